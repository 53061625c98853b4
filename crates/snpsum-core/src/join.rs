//! Inner join of parsed variants against the reference list.

use std::collections::HashMap;

use crate::reference::{SnpEntry, SnpList};
use crate::vcf::VariantRecord;

/// One row of the joined table: a variant paired with the reference entry
/// it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedVariant {
    /// Identifier both sides agree on
    pub id: String,
    /// The variant record from the VCF
    pub variant: VariantRecord,
    /// Extra reference columns carried through the join
    pub reference: Vec<(String, String)>,
}

/// Inner join on identifier.
///
/// Output order follows the variant input. Duplicate identifiers on either
/// side expand to every (variant, reference) pair, the way a dataframe merge
/// does. Variants without an identifier never match.
#[must_use]
pub fn inner_join_on_id(variants: &[VariantRecord], snp_list: &SnpList) -> Vec<JoinedVariant> {
    let mut by_id: HashMap<&str, Vec<&SnpEntry>> = HashMap::new();
    for entry in snp_list.entries() {
        by_id.entry(entry.id.as_str()).or_default().push(entry);
    }

    let mut joined = Vec::new();
    for variant in variants {
        let Some(id) = variant.id.as_deref() else {
            continue;
        };
        let Some(matches) = by_id.get(id) else {
            continue;
        };
        for entry in matches {
            joined.push(JoinedVariant {
                id: id.to_string(),
                variant: variant.clone(),
                reference: entry.extra.clone(),
            });
        }
    }

    joined
}
