use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionType {
    StreamSource,
    StreamDecorator,
    Metric,
}

/// Diagnostic tree describing how a stream was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub expression_node_id: String,
    pub expression_type: ExpressionType,
    pub function_name: String,
    pub implementing_type: String,
    pub expression: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Explanation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub helpers: Vec<Explanation>,
}

impl Explanation {
    pub fn new<S: Into<String>>(expression_node_id: S, expression_type: ExpressionType) -> Self {
        Self {
            expression_node_id: expression_node_id.into(),
            expression_type,
            function_name: String::new(),
            implementing_type: String::new(),
            expression: String::new(),
            children: Vec::new(),
            helpers: Vec::new(),
        }
    }

    pub fn with_function_name<S: Into<String>>(mut self, name: S) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn with_implementing_type<S: Into<String>>(mut self, name: S) -> Self {
        self.implementing_type = name.into();
        self
    }

    pub fn with_expression<S: Into<String>>(mut self, expression: S) -> Self {
        self.expression = expression.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Explanation>) -> Self {
        self.children = children;
        self
    }

    pub fn with_helper(mut self, helper: Explanation) -> Self {
        self.helpers.push(helper);
        self
    }
}
