// Offset/limit pagination for the list endpoints

use serde::Deserialize;

const DEFAULT_LIMIT: u32 = 100;
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self { skip, limit }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.skip.unwrap_or(0))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let page = PageQuery::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 100);
    }

    #[test]
    fn limit_is_clamped() {
        let page = PageQuery::new(Some(10), Some(10_000));
        assert_eq!(page.offset(), 10);
        assert_eq!(page.limit(), 500);
        let page = PageQuery::new(None, Some(0));
        assert_eq!(page.limit(), 1);
    }
}
