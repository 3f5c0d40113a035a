//! Access control: decides whether a member access is permitted given who
//! declared the member and where the access happens.
//!
//! Visibility is enforced by this explicit check at every field read, field
//! write, method call, and constructor call on an explicit receiver.

use super::classes::ClassTable;
use crate::parser::ast::Visibility;

/// Where an access originates: the compilation unit being executed and the
/// class whose body contains the access, when there is one.
#[derive(Debug, Clone, Copy)]
pub struct AccessContext<'a> {
    pub unit: &'a str,
    pub class: Option<&'a str>,
}

/// Whether a member declared in `owner` with the given visibility may be
/// accessed from `ctx`.
///
/// `public` is open. `private` admits only code in the declaring class
/// itself. `protected` admits the declaring class, its descendants, and any
/// class in the declaring unit. No modifier admits the declaring unit.
pub fn is_visible(
    table: &ClassTable,
    owner: &str,
    visibility: Visibility,
    ctx: AccessContext<'_>,
) -> bool {
    match visibility {
        Visibility::Public => true,
        Visibility::Private => ctx.class == Some(owner),
        Visibility::Protected => {
            let related = ctx
                .class
                .map(|c| table.is_same_or_descendant(c, owner))
                .unwrap_or(false);
            related || ctx.unit == table.unit_of(owner)
        }
        Visibility::Package => ctx.unit == table.unit_of(owner),
    }
}
