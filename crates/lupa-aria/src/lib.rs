//! lupa ARIA
//!
//! The static ARIA knowledge the query engine consumes but does not own:
//!
//! - Role definitions (which states a role supports, whether it takes its
//!   name from content)
//! - Element concepts (which implicit roles an HTML element maps to, under
//!   which attribute constraints)
//! - Accessible-name computation (a pragmatic subset of the AccName
//!   algorithm, enough for test-facing queries)

pub mod concepts;
pub mod name;
pub mod roles;

pub use concepts::{ConceptConstraint, ElementConcept, element_concepts};
pub use name::accessible_name;
pub use roles::{RoleDefinition, role_definition, role_supports};
