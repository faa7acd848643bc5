//! Audio Context - 滤镜阶段与滤镜链
//!
//! 序列化格式：`name=k=v:k=v`，多个阶段以逗号连接，按声明顺序执行

/// 单个具名滤镜，参数保持声明顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStage {
    name: String,
    params: Vec<(String, String)>,
}

impl FilterStage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl std::fmt::Display for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '=' } else { ':' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// 有序滤镜链，构建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    pub fn new(stages: Vec<FilterStage>) -> Self {
        Self { stages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }
}

impl FromIterator<FilterStage> for FilterChain {
    fn from_iter<I: IntoIterator<Item = FilterStage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Display for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", stage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_without_params() {
        assert_eq!(FilterStage::new("anull").to_string(), "anull");
    }

    #[test]
    fn test_stage_params_keep_order() {
        let stage = FilterStage::new("loudnorm")
            .param("I", -13)
            .param("TP", "-1.0")
            .param("LRA", 11);
        assert_eq!(stage.to_string(), "loudnorm=I=-13:TP=-1.0:LRA=11");
        assert_eq!(stage.get("TP"), Some("-1.0"));
        assert_eq!(stage.get("missing"), None);
    }

    #[test]
    fn test_chain_joins_with_commas() {
        let chain: FilterChain = vec![
            FilterStage::new("highpass").param("f", 80),
            FilterStage::new("lowpass").param("f", 8000),
        ]
        .into_iter()
        .collect();
        assert_eq!(chain.to_string(), "highpass=f=80,lowpass=f=8000");
        assert_eq!(chain.len(), 2);
        assert!(FilterChain::empty().to_string().is_empty());
    }
}
