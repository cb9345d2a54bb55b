use std::collections::{BTreeSet, HashMap};

/// 没有调用统计时边的默认权重
pub const DEFAULT_CALL_WEIGHT: u32 = 1;

/// 包节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgNode {
    /// 短名: "printers"
    short_name: String,
    /// 完整名: "github.com/a-little-srdjan/grapher/printers"
    full_name: String,
    /// 本包的函数声明数
    func_decls: u32,
    /// 子节点完整名
    children: BTreeSet<String>,
    /// 子节点短名 -> 调用次数
    call_stats: HashMap<String, u32>,
}

impl PkgNode {
    pub fn new(full_name: impl Into<String>, func_decls: u32) -> Self {
        let full_name = full_name.into();
        let short_name = Self::derive_short_name(&full_name);
        Self {
            short_name,
            full_name,
            func_decls,
            children: BTreeSet::new(),
            call_stats: HashMap::new(),
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn func_decls(&self) -> u32 {
        self.func_decls
    }

    /// 子节点完整名（按字典序）
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(String::as_str)
    }

    /// 指向某个子节点的调用权重，按子节点短名查找
    pub fn call_weight(&self, child_short_name: &str) -> u32 {
        self.call_stats
            .get(child_short_name)
            .copied()
            .unwrap_or(DEFAULT_CALL_WEIGHT)
    }

    pub(crate) fn add_child(&mut self, full_name: &str) {
        self.children.insert(full_name.to_string());
    }

    pub(crate) fn record_calls(&mut self, child_short_name: &str, count: u32) {
        self.call_stats.insert(child_short_name.to_string(), count);
    }

    fn derive_short_name(full_name: &str) -> String {
        full_name
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(full_name)
            .to_string()
    }
}
