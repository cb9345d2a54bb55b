//! 渲染配置

/// GraphML 节点尺寸配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// 基础边长
    pub node_size: f64,
    /// 按函数声明占比叠加的最大增量
    pub node_size_boost: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_size: 30.0,
            node_size_boost: 70.0,
        }
    }
}

impl RenderConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("GRAPHER_NODE_SIZE") {
            if let Ok(s) = v.parse() {
                config.node_size = s;
            }
        }

        if let Ok(v) = std::env::var("GRAPHER_NODE_SIZE_BOOST") {
            if let Ok(b) = v.parse() {
                config.node_size_boost = b;
            }
        }

        config
    }

    pub fn with_node_size(mut self, size: f64) -> Self {
        self.node_size = size;
        self
    }

    pub fn with_node_size_boost(mut self, boost: f64) -> Self {
        self.node_size_boost = boost;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.node_size, 30.0);
        assert_eq!(config.node_size_boost, 70.0);
    }

    #[test]
    fn test_render_config_builder() {
        let config = RenderConfig::default()
            .with_node_size(20.0)
            .with_node_size_boost(10.0);
        assert_eq!(config, RenderConfig { node_size: 20.0, node_size_boost: 10.0 });
    }
}
