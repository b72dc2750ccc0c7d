use super::PatchDescriptor;
use crate::ambiguous::Ambiguous;

impl PatchDescriptor {
    /// Merge of two descriptors asserted at the same level. A field supplied
    /// by both sides becomes ambiguous, `self`'s candidates first.
    pub fn merge_symmetric(self, other: PatchDescriptor) -> PatchDescriptor {
        PatchDescriptor {
            target_type: Ambiguous::merge_symmetric(self.target_type, other.target_type),
            member_name: Ambiguous::merge_symmetric(self.member_name, other.member_name),
            member_kind: Ambiguous::merge_symmetric(self.member_kind, other.member_kind),
            arguments: Ambiguous::merge_symmetric(self.arguments, other.arguments),
        }
    }

    /// Method-level data over class-level data: each field present on `self`
    /// wins, independently of the others.
    pub fn merge_over(self, class_data: PatchDescriptor) -> PatchDescriptor {
        PatchDescriptor {
            target_type: self.target_type.or(class_data.target_type),
            member_name: self.member_name.or(class_data.member_name),
            member_kind: self.member_kind.or(class_data.member_kind),
            arguments: self.arguments.or(class_data.arguments),
        }
    }
}
