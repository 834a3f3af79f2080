use crate::semantic::TypeId;

use super::error::{ExtractError, Result, Unsupported};
use super::model::{MemberKind, SemanticModel};

/// A data member of a structural type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub ty: TypeId,
}

/// Data members of `ty`, in the order they were written.
///
/// Methods the host attaches (`Equals`, `GetHashCode`, `ToString`) are
/// dropped. Members that cannot become a field or property fail the request.
pub fn shape<M: SemanticModel + ?Sized>(model: &M, ty: TypeId) -> Result<Vec<MemberDescriptor>> {
    let mut members = Vec::new();
    for member in model.members(ty) {
        match member.kind {
            MemberKind::Property | MemberKind::Field => {
                if model.is_structural(member.ty) {
                    return Err(Unsupported::NestedStructuralMember(member.name).into());
                }
                members.push(MemberDescriptor {
                    name: member.name,
                    ty: member.ty,
                });
            }
            MemberKind::Method => {}
            MemberKind::Indexer | MemberKind::Event => {
                return Err(ExtractError::UnsupportedMemberKind {
                    name: member.name,
                    kind: member.kind,
                });
            }
        }
    }
    Ok(members)
}
