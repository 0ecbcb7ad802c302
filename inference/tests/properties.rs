use std::mem::discriminant;

use tabrdf_core::{pattern, Namespaces, Pattern, Translator};
use tabrdf_inference::{Classifier, Interpretation, Join, Merge, Role, RoleKind, Run, Step};

fn translator() -> Translator {
	Translator::new(Namespaces {
		data: "http://example.org/".to_owned(),
		columns: "http://example.org/".to_owned(),
		types: "http://example.org/type/".to_owned(),
		..Default::default()
	})
}

fn patterns() -> Vec<Pattern> {
	vec![
		pattern! [
			?row <"http://www.w3.org/1999/02/22-rdf-syntax-ns#type"> <"http://example.org/type/people"> .
			?row <"http://example.org/name"> "Ann" .
		],
		pattern! [
			<"http://example.org/people"> ?slot ?row .
			?row <"http://example.org/name"> ?v .
		],
		pattern! [
			?x ?p ?y .
			?z ?q ?x .
		],
		pattern! [
			?table ?p <"http://sparql.xyz/facade-x/ns/root"> .
			?table ?slot ?row .
			?row ?column "Ann" .
		],
		pattern! [
			?r ?p <"http://other.org/x"> .
			?r2 ?p "v" .
		],
		pattern! [
			?x <"http://www.w3.org/1999/02/22-rdf-syntax-ns#_1"> ?r .
			?y <"http://example.org/name"> ?x .
		],
		pattern! [
			?a ?p <"http://example.org/type/people"> .
			?t ?p ?r .
			?r <"http://example.org/name"> ?v .
		],
		pattern! [
			?w <"http://example.org/name"> "B" .
			?x ?p ?y .
			?z ?q ?x .
			?x <"http://example.org/name"> "Ann" .
		],
		pattern! [
			<"http://example.org/people"> <"http://www.w3.org/1999/02/22-rdf-syntax-ns#_1"> ?r .
			?s ?p <"http://example.org/people"> .
		],
	]
}

/// Every ordering of `0..n`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
	if n == 0 {
		return vec![Vec::new()];
	}

	let mut result = Vec::new();
	for p in permutations(n - 1) {
		for i in 0..=p.len() {
			let mut q = p.clone();
			q.insert(i, n - 1);
			result.push(q)
		}
	}

	result
}

#[test]
fn determinism() {
	let translator = translator();
	let classifier = Classifier::new(&translator);

	for pattern in patterns() {
		assert_eq!(classifier.classify(&pattern), classifier.classify(&pattern))
	}
}

#[test]
fn order_independence() {
	let translator = translator();
	let classifier = Classifier::new(&translator);

	for pattern in patterns() {
		let expected = classifier.classify(&pattern);

		for order in permutations(pattern.len()) {
			let permuted = pattern.permuted(&order);
			let found = classifier.classify(&permuted);

			match (&expected, &found) {
				(Ok(a), Ok(b)) => assert_eq!(a, b, "in {permuted}"),
				(Err(a), Err(b)) => {
					assert_eq!(discriminant(a), discriminant(b), "in {permuted}");
					assert_eq!(a.term(), b.term(), "in {permuted}")
				}
				_ => panic!("{permuted}: expected {expected:?}, found {found:?}"),
			}
		}
	}
}

#[test]
fn monotonicity() {
	let translator = translator();

	for pattern in patterns() {
		let mut run = Run::new(&translator, &pattern);

		loop {
			let before = run.interpretation().kinds();
			let step = match run.step() {
				Ok(step) => step,
				Err(_) => break,
			};

			for (term, kind) in run.interpretation().kinds() {
				if let Some(&previous) = before.get(&term) {
					assert!(
						kind == previous || kind.specializes().contains(previous),
						"{term} moved from {previous} to {kind}"
					)
				}
			}

			if step == Step::Fixpoint {
				break;
			}
		}
	}
}

#[test]
fn idempotent_merge() {
	let translator = translator();
	let classifier = Classifier::new(&translator);

	for pattern in patterns() {
		if let Ok(interpretation) = classifier.classify(&pattern) {
			let mut merged: Interpretation = interpretation.clone();

			for (term, role) in &interpretation {
				for triple in role.triples() {
					assert_eq!(
						merged.merge(term, role.kind(), triple),
						Ok(Merge::Unchanged)
					)
				}
			}

			assert_eq!(merged, interpretation)
		}
	}
}

#[test]
fn join_commutativity() {
	let pattern = pattern! [
		?x ?p ?y .
		?z ?q ?x .
	];
	let a = pattern.triples()[0].clone();
	let b = pattern.triples()[1].clone();

	for x in RoleKind::ALL {
		for y in RoleKind::ALL {
			let left = Join::combine(&Role::new(x, a.clone()), &Role::new(y, b.clone()));
			let right = Join::combine(&Role::new(y, b.clone()), &Role::new(x, a.clone()));
			assert_eq!(left, right, "{x} and {y}")
		}
	}
}
