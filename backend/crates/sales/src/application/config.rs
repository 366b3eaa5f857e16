//! Application Configuration
//!
//! Configuration for the Sales application layer.

/// Sales application configuration
#[derive(Debug, Clone)]
pub struct SalesConfig {
    /// Page size of the public product list
    pub product_list_limit: i64,
    /// Upper bound on positions in one sale
    pub max_sale_positions: usize,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            product_list_limit: 500,
            max_sale_positions: 100,
        }
    }
}

impl SalesConfig {
    /// Create config for development (short product pages)
    pub fn development() -> Self {
        Self {
            product_list_limit: 50,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = SalesConfig::default();
        assert_eq!(config.product_list_limit, 500);
        assert_eq!(config.max_sale_positions, 100);
        assert!(SalesConfig::development().product_list_limit < config.product_list_limit);
    }
}
