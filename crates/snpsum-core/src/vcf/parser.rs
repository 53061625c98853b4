use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use noodles_vcf::{
    self as vcf,
    variant::record::{
        info::field::{value::array::Values as _, value::Array, Value},
        AlternateBases as _, Filters as _, Ids as _, Info as _,
    },
};

use super::types::{InfoValue, VariantRecord};
use crate::error::{Result, SnpsumError};

/// VCF file scanner producing tabular variant records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VcfScanner;

impl VcfScanner {
    /// Scan a VCF file from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The VCF header cannot be parsed
    /// - Any variant record is malformed
    pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<Vec<VariantRecord>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| SnpsumError::Vcf(format!("failed to open {}: {e}", path.display())))?;
        Self::scan_reader(BufReader::new(file))
    }

    /// Scan VCF content from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the VCF content is malformed.
    pub fn scan_str(content: &str) -> Result<Vec<VariantRecord>> {
        Self::scan_reader(io::Cursor::new(content.as_bytes()))
    }

    /// Scan VCF from a buffered reader.
    ///
    /// Records are converted in a single forward pass, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the header or any record is malformed.
    pub fn scan_reader<R: BufRead>(reader: R) -> Result<Vec<VariantRecord>> {
        let mut vcf_reader = vcf::io::Reader::new(reader);

        let header = vcf_reader
            .read_header()
            .map_err(|e| SnpsumError::Vcf(format!("invalid VCF header: {e}")))?;

        let mut variants = Vec::new();
        for result in vcf_reader.records() {
            let record =
                result.map_err(|e| SnpsumError::Vcf(format!("invalid VCF record: {e}")))?;
            variants.push(Self::convert_record(&header, &record)?);
        }

        Ok(variants)
    }

    /// Convert one noodles record into the tabular representation.
    fn convert_record(header: &vcf::Header, record: &vcf::Record) -> Result<VariantRecord> {
        let chrom = record.reference_sequence_name().to_string();

        let pos = match record.variant_start() {
            Some(Ok(position)) => usize::from(position) as u64,
            Some(Err(e)) => return Err(SnpsumError::Vcf(format!("invalid position: {e}"))),
            None => return Err(SnpsumError::Vcf("missing position".to_string())),
        };

        // Multiple ids stay joined with ';', the raw column separator.
        let ids: Vec<String> = record.ids().iter().map(String::from).collect();
        let id = if ids.is_empty() { None } else { Some(ids.join(";")) };

        let ref_bases = record.reference_bases().to_string();

        let alt_alleles = record
            .alternate_bases()
            .iter()
            .map(|result| result.map(String::from))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| SnpsumError::Vcf(format!("invalid alternate bases: {e}")))?;

        let quality = match record.quality_score() {
            Some(Ok(qual)) => Some(qual),
            Some(Err(e)) => return Err(SnpsumError::Vcf(format!("invalid quality score: {e}"))),
            None => None,
        };

        let filters = record
            .filters()
            .iter(header)
            .map(|result| result.map(String::from))
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| SnpsumError::Vcf(format!("invalid filters: {e}")))?;

        let mut info = Vec::new();
        for result in record.info().iter(header) {
            let (key, value) =
                result.map_err(|e| SnpsumError::Vcf(format!("invalid INFO field: {e}")))?;
            let converted = match value {
                Some(v) => Self::convert_info_value(v)?,
                None => InfoValue::String(".".to_string()),
            };
            info.push((key.to_string(), converted));
        }

        Ok(VariantRecord {
            chrom,
            pos,
            id,
            ref_bases,
            alt_alleles,
            quality,
            filters,
            info,
        })
    }

    fn convert_info_value(value: Value<'_>) -> Result<InfoValue> {
        let converted = match value {
            Value::Integer(n) => InfoValue::Integer(n),
            Value::Float(n) => InfoValue::Float(n),
            Value::Flag => InfoValue::Flag,
            Value::Character(c) => InfoValue::String(c.to_string()),
            Value::String(s) => InfoValue::String(s.to_string()),
            Value::Array(array) => Self::convert_info_array(&array)?,
        };
        Ok(converted)
    }

    /// Arrays with missing elements ('.') demote to strings so the gaps
    /// still render as '.'.
    fn convert_info_array(array: &Array<'_>) -> Result<InfoValue> {
        fn bad(e: io::Error) -> SnpsumError {
            SnpsumError::Vcf(format!("invalid INFO array: {e}"))
        }

        let converted = match array {
            Array::Integer(values) => {
                let items: Vec<Option<i32>> =
                    values.iter().collect::<io::Result<_>>().map_err(bad)?;
                if items.iter().all(Option::is_some) {
                    InfoValue::IntArray(items.into_iter().flatten().collect())
                } else {
                    InfoValue::StringArray(stringify_sparse(items))
                }
            }
            Array::Float(values) => {
                let items: Vec<Option<f32>> =
                    values.iter().collect::<io::Result<_>>().map_err(bad)?;
                if items.iter().all(Option::is_some) {
                    InfoValue::FloatArray(items.into_iter().flatten().collect())
                } else {
                    InfoValue::StringArray(stringify_sparse(items))
                }
            }
            Array::Character(values) => {
                let items: Vec<Option<char>> =
                    values.iter().collect::<io::Result<_>>().map_err(bad)?;
                InfoValue::StringArray(stringify_sparse(items))
            }
            Array::String(values) => {
                let items: Vec<Option<_>> = values.iter().collect::<io::Result<_>>().map_err(bad)?;
                InfoValue::StringArray(
                    items
                        .into_iter()
                        .map(|item| item.map_or_else(|| ".".to_string(), |s| s.to_string()))
                        .collect(),
                )
            }
        };
        Ok(converted)
    }
}

fn stringify_sparse<T: ToString>(items: Vec<Option<T>>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.map_or_else(|| ".".to_string(), |v| v.to_string()))
        .collect()
}
