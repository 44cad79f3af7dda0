use crate::command::parser::{ParseError, parse_expression};
use crate::command::types::{StreamExpression, StreamExpressionParameter};

#[cfg(test)]
mod expression_tests {
    use super::*;

    #[test]
    fn test_parse_nested_expression_with_named_and_values() {
        let expr = parse_expression(r#"hashRollup(list(tuple(a=1)), over="a,b", sum(x))"#)
            .expect("Failed to parse rollup");

        assert_eq!(expr.function_name(), "hashRollup");
        assert_eq!(expr.parameters().len(), 3);

        match &expr.parameters()[0] {
            StreamExpressionParameter::Expression(list) => {
                assert_eq!(list.function_name(), "list");
                assert_eq!(list.parameters().len(), 1);
            }
            other => panic!("Expected expression, got {:?}", other),
        }

        let over: Vec<_> = expr.named_parameters("over").collect();
        assert_eq!(over.len(), 1);
        assert_eq!(over[0].value(), Some("a,b"));

        match &expr.parameters()[2] {
            StreamExpressionParameter::Expression(sum) => {
                assert_eq!(sum.function_name(), "sum");
                assert_eq!(sum.value_parameters().collect::<Vec<_>>(), vec!["x"]);
            }
            other => panic!("Expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_named_parameter_holding_expression() {
        let expr = parse_expression("outer(inner=list())").expect("parse");
        let named: Vec<_> = expr.named_parameters("inner").collect();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].value(), None);
        assert!(matches!(
            named[0].parameter(),
            StreamExpressionParameter::Expression(e) if e.function_name() == "list"
        ));
    }

    #[test]
    fn test_parse_empty_call() {
        let expr = parse_expression("list()").expect("parse");
        assert_eq!(expr, StreamExpression::new("list"));
    }

    #[test]
    fn test_parse_rejects_trailing_tokens() {
        assert_eq!(
            parse_expression("list() extra"),
            Err(ParseError::UnexpectedToken("extra".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_missing_close_paren() {
        assert!(matches!(
            parse_expression("sum(x"),
            Err(ParseError::UnexpectedEnd(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bare_value_at_top_level() {
        assert_eq!(
            parse_expression("\"oops\""),
            Err(ParseError::ExpectedToken(
                "function name".to_string(),
                "\"oops\"".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_expression("   "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_display_quotes_values_that_are_not_bare_words() {
        let expr = StreamExpression::new("hashRollup")
            .with_parameter("<stream>")
            .with_named("over", "a,b")
            .with_parameter(StreamExpression::new("count").with_parameter("*"));

        assert_eq!(
            expr.to_string(),
            r#"hashRollup("<stream>",over="a,b",count(*))"#
        );
    }

    #[test]
    fn test_display_escapes_quotes_and_reparses() {
        let expr = StreamExpression::new("tuple").with_named("s", "he said \"hi\"");
        let text = expr.to_string();
        assert_eq!(text, r#"tuple(s="he said \"hi\"")"#);
        assert_eq!(parse_expression(&text).expect("reparse"), expr);
    }
}
