use std::fmt;

use iref::{InvalidIri, Iri, IriBuf};
use langtag::LanguageTagBuf;
use rdf_types::literal;
use serde::{Deserialize, Serialize};

pub const XSD_STRING: &Iri = static_iref::iri!("http://www.w3.org/2001/XMLSchema#string");

/// Literal type: a datatype IRI, or a language tag for language strings.
pub type LiteralType = literal::Type<IriBuf, LanguageTagBuf>;

/// Literal value.
pub type Literal = rdf_types::Literal<LiteralType, String>;

/// Pattern term.
///
/// Anything that can occupy the subject, predicate or object position of a
/// triple pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
	/// Named constant.
	Iri(IriBuf),

	/// Anonymous constant, given by its label (without the `_:` prefix).
	Blank(String),

	/// Literal value.
	Literal(Literal),

	/// Pattern variable, given by its name (without the `?` prefix).
	Var(String),
}

impl Term {
	pub fn iri(iri: &str) -> Result<Self, InvalidIri<String>> {
		IriBuf::new(iri.to_owned()).map(Self::Iri)
	}

	pub fn blank(label: impl Into<String>) -> Self {
		Self::Blank(label.into())
	}

	pub fn var(name: impl Into<String>) -> Self {
		Self::Var(name.into())
	}

	/// Plain string literal.
	pub fn literal(value: impl Into<String>) -> Self {
		Self::typed_literal(value, XSD_STRING.to_owned())
	}

	pub fn typed_literal(value: impl Into<String>, datatype: IriBuf) -> Self {
		Self::Literal(Literal::new(value.into(), LiteralType::Any(datatype)))
	}

	pub fn lang_string(value: impl Into<String>, tag: &str) -> Result<Self, langtag::Error> {
		let tag = LanguageTagBuf::new(tag.as_bytes().to_vec()).map_err(|(e, _)| e)?;
		Ok(Self::Literal(Literal::new(
			value.into(),
			LiteralType::LangString(tag),
		)))
	}

	pub fn as_iri(&self) -> Option<&str> {
		match self {
			Self::Iri(iri) => Some(iri.as_str()),
			_ => None,
		}
	}

	pub fn as_blank(&self) -> Option<&str> {
		match self {
			Self::Blank(label) => Some(label),
			_ => None,
		}
	}

	pub fn is_iri(&self) -> bool {
		matches!(self, Self::Iri(_))
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Blank(_))
	}

	pub fn is_literal(&self) -> bool {
		matches!(self, Self::Literal(_))
	}

	pub fn is_var(&self) -> bool {
		matches!(self, Self::Var(_))
	}

	/// Checks if this term stands for a single, unambiguous resource.
	///
	/// Named constants and literals have one identity and cannot play two
	/// different roles in the same pattern. Variables and anonymous
	/// constants can.
	pub fn is_ground(&self) -> bool {
		matches!(self, Self::Iri(_) | Self::Literal(_))
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
			Self::Literal(literal) => {
				write!(f, "{:?}", literal.value())?;
				match literal.type_() {
					LiteralType::Any(ty) if ty.as_str() == XSD_STRING.as_str() => Ok(()),
					LiteralType::Any(ty) => write!(f, "^^<{ty}>"),
					LiteralType::LangString(tag) => write!(f, "@{}", tag.as_str()),
				}
			}
			Self::Var(name) => write!(f, "?{name}"),
		}
	}
}
