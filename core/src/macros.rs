/// Creates a new pattern term.
///
/// The resulting value has type [`Term`](crate::Term).
#[macro_export]
macro_rules! term {
	{
		? $id:ident
	} => {
		$crate::Term::var(stringify!($id))
	};
	{
		< $iri:literal >
	} => {
		$crate::Term::Iri($crate::iref::IriBuf::new($iri.to_owned()).unwrap())
	};
	{
		_ : $id:literal
	} => {
		$crate::Term::blank($id)
	};
	{
		$value:literal ^^ $ty:literal
	} => {
		$crate::Term::typed_literal(
			$value,
			$crate::iref::IriBuf::new($ty.to_owned()).unwrap()
		)
	};
	{
		$value:literal @ $lang:ident
	} => {
		$crate::Term::lang_string($value, stringify!($lang)).unwrap()
	};
	{
		$value:literal
	} => {
		$crate::Term::literal($value)
	};
}

/// Creates a new graph pattern.
///
/// The resulting value has type [`Pattern`](crate::Pattern).
#[macro_export]
macro_rules! pattern {
	// Terms.
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] ? $id:ident $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!(? $id)),] $($rest)*)
	};
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] < $iri:literal > $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!(< $iri >)),] $($rest)*)
	};
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] _ : $id:literal $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!(_ : $id)),] $($rest)*)
	};
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] $value:literal ^^ $ty:literal $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!($value ^^ $ty)),] $($rest)*)
	};
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] $value:literal @ $lang:ident $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!($value @ $lang)),] $($rest)*)
	};
	{
		@tokenize [$($acc:tt)*] [$($current:tt)*] $value:literal $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)*] [$($current)* ($crate::term!($value)),] $($rest)*)
	};
	// End of triple.
	{
		@tokenize [$($acc:tt)*] [($s:expr), ($p:expr), ($o:expr),] . $($rest:tt)*
	} => {
		$crate::pattern!(@tokenize [$($acc)* $crate::rdf_types::Triple($s, $p, $o),] [] $($rest)*)
	};
	// End of input.
	{
		@tokenize [$($acc:tt)*] []
	} => {
		$crate::Pattern::from(vec![$($acc)*])
	};
	// Main rule.
	{
		$($t:tt)*
	} => {
		$crate::pattern!(@tokenize [] [] $($t)*)
	};
}
