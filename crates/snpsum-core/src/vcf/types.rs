/// A single variant record in tabular form
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    /// Chromosome name (e.g., "chr1", "20")
    pub chrom: String,
    /// 1-based position on the chromosome
    pub pos: u64,
    /// Variant identifier (e.g., rs number) if provided
    pub id: Option<String>,
    /// Reference allele bases
    pub ref_bases: String,
    /// Alternate allele(s) in file order
    pub alt_alleles: Vec<String>,
    /// Phred-scaled quality score if available
    pub quality: Option<f32>,
    /// Filter tags in file order (empty when the column is ".")
    pub filters: Vec<String>,
    /// INFO field values in file order
    pub info: Vec<(String, InfoValue)>,
}

impl VariantRecord {
    /// ALT column in tabular form: alleles joined with ",", "." when absent.
    #[must_use]
    pub fn alt_field(&self) -> String {
        if self.alt_alleles.is_empty() {
            ".".to_string()
        } else {
            self.alt_alleles.join(",")
        }
    }

    /// FILTER column in tabular form: tags joined with ";", "." when absent.
    #[must_use]
    pub fn filter_field(&self) -> String {
        if self.filters.is_empty() {
            ".".to_string()
        } else {
            self.filters.join(";")
        }
    }

    /// INFO column in tabular form: "key=value" pairs joined with ";",
    /// "." when absent.
    #[must_use]
    pub fn info_field(&self) -> String {
        if self.info.is_empty() {
            ".".to_string()
        } else {
            self.info
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(";")
        }
    }

    /// QUAL column in tabular form, "." when absent.
    #[must_use]
    pub fn qual_field(&self) -> String {
        self.quality
            .map_or_else(|| ".".to_string(), |q| format!("{q}"))
    }
}

/// INFO field value (can be various types)
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// Single integer value
    Integer(i32),
    /// Single floating point value
    Float(f32),
    /// Boolean flag (presence indicates true)
    Flag,
    /// Single string value
    String(String),
    /// Array of integer values
    IntArray(Vec<i32>),
    /// Array of floating point values
    FloatArray(Vec<f32>),
    /// Array of string values
    StringArray(Vec<String>),
}

impl std::fmt::Display for InfoValue {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Flag => write!(f, "true"),
            Self::String(v) => write!(f, "{v}"),
            Self::IntArray(arr) => {
                let s = arr
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{s}")
            }
            Self::FloatArray(arr) => {
                let s = arr
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{s}")
            }
            Self::StringArray(arr) => write!(f, "{}", arr.join(",")),
        }
    }
}
