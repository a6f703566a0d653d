//! Identifier and cross-reference checks over an assembled document.

use crate::document::Document;
use crate::error::IntegrityError;
use std::collections::HashSet;

/// Verifies identifier uniqueness and representation alignment.
///
/// # Errors
/// - `DuplicateId` when any generated id appears twice.
/// - `MisalignedSections` when admin, file group and division counts differ.
/// - `DanglingFilePointer` when a pointer targets an unknown file.
/// - `DivisionMismatch` when division `i` does not list exactly the files of
///   file group `i`, in order.
pub fn verify_integrity(document: &Document) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    for id in document.declared_ids() {
        if !seen.insert(id) {
            return Err(IntegrityError::DuplicateId(id.to_string()));
        }
    }
    // The linked admin id is generated too and must not collide.
    if seen.contains(document.descriptive.admin_id.as_str()) {
        return Err(IntegrityError::DuplicateId(
            document.descriptive.admin_id.clone(),
        ));
    }

    let groups: Vec<_> = document.file_groups().collect();
    let divisions: Vec<_> = document.divisions().collect();
    if groups.len() != divisions.len() || groups.len() != document.admin_sections.len() {
        return Err(IntegrityError::MisalignedSections {
            admin_sections: document.admin_sections.len(),
            file_groups: groups.len(),
            divisions: divisions.len(),
        });
    }

    let file_ids: HashSet<&str> = groups.iter().flat_map(|group| group.file_ids()).collect();
    for division in &divisions {
        for pointer in &division.pointers {
            if !file_ids.contains(pointer.file_id.as_str()) {
                return Err(IntegrityError::DanglingFilePointer {
                    pointer_id: pointer.id.clone(),
                    file_id: pointer.file_id.clone(),
                });
            }
        }
    }

    for (index, (group, division)) in groups.iter().zip(&divisions).enumerate() {
        if !group.file_ids().eq(division.target_file_ids()) {
            return Err(IntegrityError::DivisionMismatch { index });
        }
    }

    Ok(())
}
