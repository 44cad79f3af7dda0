use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Sort order a stream declares for its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamComparator {
    Field {
        field: String,
        direction: SortDirection,
    },
    Multiple(Vec<StreamComparator>),
}

impl StreamComparator {
    pub fn field<S: Into<String>>(field: S, direction: SortDirection) -> Self {
        StreamComparator::Field {
            field: field.into(),
            direction,
        }
    }

    /// Field names in comparison order.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            StreamComparator::Field { field, .. } => vec![field.as_str()],
            StreamComparator::Multiple(parts) => parts.iter().flat_map(|p| p.fields()).collect(),
        }
    }
}

impl fmt::Display for StreamComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamComparator::Field { field, direction } => {
                write!(f, "{} {}", field, direction.as_str())
            }
            StreamComparator::Multiple(parts) => {
                for (idx, part) in parts.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}
