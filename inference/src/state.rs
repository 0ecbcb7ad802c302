//! Interpretation state graph.
//!
//! A classification may leave some terms with a positional role only. The
//! state graph records a completed interpretation as its root and links it to
//! alternative interpretations where such a role has been replaced by a more
//! specific guess, forming a tree of candidate interpretations.
use std::fmt;

use slab::Slab;
use tabrdf_core::Term;

use crate::{Interpretation, RoleKind};

/// State identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
	pub fn index(&self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Role refinement leading from a state to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
	pub term: Term,
	pub from: RoleKind,
	pub to: RoleKind,
}

/// Candidate interpretation.
#[derive(Debug, Clone)]
pub struct State {
	interpretation: Interpretation,
	parent: Option<(NodeId, Refinement)>,
	children: Vec<NodeId>,
}

impl State {
	pub fn interpretation(&self) -> &Interpretation {
		&self.interpretation
	}

	/// Parent state and the refinement leading to this state.
	pub fn parent(&self) -> Option<(NodeId, &Refinement)> {
		self.parent.as_ref().map(|(id, r)| (*id, r))
	}

	pub fn children(&self) -> &[NodeId] {
		&self.children
	}

	/// Checks that no term holds a positional role anymore.
	pub fn is_final(&self) -> bool {
		!self.interpretation.is_ambiguous()
	}
}

#[derive(Debug, thiserror::Error)]
pub enum RefineError {
	#[error("unknown state {0}")]
	UnknownNode(NodeId),

	#[error("unclassified term {0}")]
	UnclassifiedTerm(Term),

	#[error("{proposed} is not a specialization of {current} for {term}")]
	NotASpecialization {
		term: Term,
		current: RoleKind,
		proposed: RoleKind,
	},
}

/// Tree of candidate interpretations.
#[derive(Debug, Clone)]
pub struct StateGraph {
	states: Slab<State>,
	root: NodeId,
}

impl StateGraph {
	pub fn new(interpretation: Interpretation) -> Self {
		let mut states = Slab::new();
		let root = NodeId(states.insert(State {
			interpretation,
			parent: None,
			children: Vec::new(),
		}));

		Self { states, root }
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn get(&self, id: NodeId) -> Option<&State> {
		self.states.get(id.0)
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.get(id)?.parent().map(|(parent, _)| parent)
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.get(id).map(State::children).unwrap_or_default()
	}

	/// Iterates over the ancestors of the given state, from its parent to
	/// the root.
	pub fn ancestors(&self, id: NodeId) -> Ancestors {
		Ancestors {
			graph: self,
			current: self.parent(id),
		}
	}

	/// Iterates over the states without children.
	pub fn leaves(&self) -> impl '_ + Iterator<Item = NodeId> {
		self.states
			.iter()
			.filter(|(_, state)| state.children.is_empty())
			.map(|(i, _)| NodeId(i))
	}

	/// Iterates over the final states.
	pub fn finals(&self) -> impl '_ + Iterator<Item = NodeId> {
		self.states
			.iter()
			.filter(|(_, state)| state.is_final())
			.map(|(i, _)| NodeId(i))
	}

	/// Creates a child of `parent` where the role of `term` is replaced by
	/// the more specific `kind`.
	pub fn refine(
		&mut self,
		parent: NodeId,
		term: &Term,
		kind: RoleKind,
	) -> Result<NodeId, RefineError> {
		let state = self.get(parent).ok_or(RefineError::UnknownNode(parent))?;
		let current = state
			.interpretation
			.kind_of(term)
			.ok_or_else(|| RefineError::UnclassifiedTerm(term.clone()))?;

		if !kind.specializes().contains(current) {
			return Err(RefineError::NotASpecialization {
				term: term.clone(),
				current,
				proposed: kind,
			});
		}

		let mut interpretation = state.interpretation.clone();
		let previous = interpretation.specialize(term, kind);
		debug_assert_eq!(previous, Some(current));

		let id = NodeId(self.states.insert(State {
			interpretation,
			parent: Some((
				parent,
				Refinement {
					term: term.clone(),
					from: current,
					to: kind,
				},
			)),
			children: Vec::new(),
		}));

		self.states[parent.0].children.push(id);
		log::trace!("state {id}: {term} refined from {current} to {kind}");
		Ok(id)
	}
}

/// Iterator over the ancestors of a state.
pub struct Ancestors<'a> {
	graph: &'a StateGraph,
	current: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = NodeId;

	fn next(&mut self) -> Option<Self::Item> {
		let id = self.current?;
		self.current = self.graph.parent(id);
		Some(id)
	}
}
