use super::snapshot::ResolvedCartLine;
use uuid::Uuid;

/// Cart lines destined for a single supplier, in their original cart order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierGroup {
    pub supplier_id: Uuid,
    pub lines: Vec<ResolvedCartLine>,
}

/// Groups cart lines by owning supplier.
///
/// Groups appear in the order their supplier is first seen, and lines keep
/// their original relative order within each group. Pure and deterministic.
pub fn partition_by_supplier(lines: Vec<ResolvedCartLine>) -> Vec<SupplierGroup> {
    let mut groups: Vec<SupplierGroup> = Vec::new();
    for line in lines {
        match groups
            .iter_mut()
            .find(|group| group.supplier_id == line.supplier_id)
        {
            Some(group) => group.lines.push(line),
            None => groups.push(SupplierGroup {
                supplier_id: line.supplier_id,
                lines: vec![line],
            }),
        }
    }
    groups
}
