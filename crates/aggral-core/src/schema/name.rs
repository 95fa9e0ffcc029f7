use heck::{ToSnakeCase, ToUpperCamelCase};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    /// Pluralized snake case, used for table names.
    pub fn table_case(&self) -> String {
        pluralizer::pluralize(&self.snake_case(), 2, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_to_table_name() {
        assert_eq!(Name::new("OrderItem").table_case(), "order_items");
        assert_eq!(Name::new("Order").table_case(), "orders");
    }

    #[test]
    fn round_trips_camel_case() {
        assert_eq!(Name::new("OrderItem").upper_camel_case(), "OrderItem");
    }
}
