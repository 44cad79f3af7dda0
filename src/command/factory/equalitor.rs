use std::fmt;

/// `left=right`, or a bare field name where both sides are the same field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEqualitor {
    left: String,
    right: String,
}

impl FieldEqualitor {
    pub fn new<L: Into<String>, R: Into<String>>(left: L, right: R) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn single<S: Into<String>>(field: S) -> Self {
        let field = field.into();
        Self {
            right: field.clone(),
            left: field,
        }
    }

    pub fn left_field(&self) -> &str {
        &self.left
    }

    pub fn right_field(&self) -> &str {
        &self.right
    }

    /// True when both sides name the same field.
    pub fn is_single_field(&self) -> bool {
        self.left == self.right
    }
}

/// Field equality list, as written in `over="a,b"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEqualitor {
    Field(FieldEqualitor),
    Multiple(Vec<StreamEqualitor>),
}

impl StreamEqualitor {
    /// Parses a comma separated list of `field` or `left=right` parts.
    /// One part yields a single field equalitor, several yield a multi-field one.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut parts = Vec::new();
        for raw in text.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(format!("empty field in '{}'", text));
            }
            let equalitor = match raw.split_once('=') {
                Some((left, right)) => {
                    let (left, right) = (left.trim(), right.trim());
                    if left.is_empty() || right.is_empty() || right.contains('=') {
                        return Err(format!("malformed field pair '{}'", raw));
                    }
                    FieldEqualitor::new(left, right)
                }
                None => FieldEqualitor::single(raw),
            };
            parts.push(StreamEqualitor::Field(equalitor));
        }

        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(StreamEqualitor::Multiple(parts))
        }
    }

    /// Depth-first list of every field equalitor in declaration order.
    pub fn flatten(&self) -> Vec<&FieldEqualitor> {
        match self {
            StreamEqualitor::Field(field) => vec![field],
            StreamEqualitor::Multiple(parts) => parts.iter().flat_map(|p| p.flatten()).collect(),
        }
    }
}

impl fmt::Display for FieldEqualitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_field() {
            f.write_str(&self.left)
        } else {
            write!(f, "{}={}", self.left, self.right)
        }
    }
}

impl fmt::Display for StreamEqualitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamEqualitor::Field(field) => write!(f, "{}", field),
            StreamEqualitor::Multiple(parts) => {
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
