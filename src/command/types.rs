use std::fmt;

/// A parsed function call such as `hashRollup(list(...), over="a,b", sum(x))`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamExpression {
    function_name: String,
    parameters: Vec<StreamExpressionParameter>,
}

/// One operand of a [`StreamExpression`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamExpressionParameter {
    Expression(StreamExpression),
    Named(StreamExpressionNamedParameter),
    Value(String),
}

/// `name=value` or `name=expr(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamExpressionNamedParameter {
    name: String,
    parameter: Box<StreamExpressionParameter>,
}

impl StreamExpression {
    pub fn new<S: Into<String>>(function_name: S) -> Self {
        Self {
            function_name: function_name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn parameters(&self) -> &[StreamExpressionParameter] {
        &self.parameters
    }

    pub fn add_parameter<P: Into<StreamExpressionParameter>>(&mut self, parameter: P) {
        self.parameters.push(parameter.into());
    }

    pub fn with_parameter<P: Into<StreamExpressionParameter>>(mut self, parameter: P) -> Self {
        self.add_parameter(parameter);
        self
    }

    pub fn with_named<N: Into<String>, P: Into<StreamExpressionParameter>>(
        self,
        name: N,
        parameter: P,
    ) -> Self {
        self.with_parameter(StreamExpressionNamedParameter::new(name, parameter))
    }

    /// Named operands with the given name, in declaration order.
    pub fn named_parameters<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a StreamExpressionNamedParameter> + use<'a> {
        let name = name.to_string();
        self.parameters.iter().filter_map(move |p| match p {
            StreamExpressionParameter::Named(named) if named.name == name => Some(named),
            _ => None,
        })
    }

    /// Positional plain values, in declaration order.
    pub fn value_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().filter_map(|p| match p {
            StreamExpressionParameter::Value(v) => Some(v.as_str()),
            _ => None,
        })
    }
}

impl StreamExpressionNamedParameter {
    pub fn new<N: Into<String>, P: Into<StreamExpressionParameter>>(name: N, parameter: P) -> Self {
        Self {
            name: name.into(),
            parameter: Box::new(parameter.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter(&self) -> &StreamExpressionParameter {
        &self.parameter
    }

    /// The plain value, when the parameter is not a nested expression.
    pub fn value(&self) -> Option<&str> {
        match self.parameter.as_ref() {
            StreamExpressionParameter::Value(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<StreamExpression> for StreamExpressionParameter {
    fn from(value: StreamExpression) -> Self {
        StreamExpressionParameter::Expression(value)
    }
}

impl From<StreamExpressionNamedParameter> for StreamExpressionParameter {
    fn from(value: StreamExpressionNamedParameter) -> Self {
        StreamExpressionParameter::Named(value)
    }
}

impl From<String> for StreamExpressionParameter {
    fn from(value: String) -> Self {
        StreamExpressionParameter::Value(value)
    }
}

impl From<&str> for StreamExpressionParameter {
    fn from(value: &str) -> Self {
        StreamExpressionParameter::Value(value.to_string())
    }
}

/// True when `value` can be written without quotes and read back unchanged.
pub fn is_bare_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '*' | '-' | ':'))
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if is_bare_word(value) {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for StreamExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function_name)?;
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for StreamExpressionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamExpressionParameter::Expression(e) => write!(f, "{}", e),
            StreamExpressionParameter::Named(n) => write!(f, "{}", n),
            StreamExpressionParameter::Value(v) => write_value(f, v),
        }
    }
}

impl fmt::Display for StreamExpressionNamedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.parameter)
    }
}
