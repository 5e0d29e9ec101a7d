use serde::Deserialize;

pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound applied to any requested page size.
pub const MAX_LIMIT: u32 = 1000;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Offset pagination. Negative values are rejected by the extractor.
#[derive(Clone, Copy, Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Rows to skip.
    #[serde(default)]
    #[param(example = 0)]
    pub skip: u32,
    /// Maximum rows to return.
    #[serde(default = "default_limit")]
    #[param(example = 10)]
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListParams {
    /// (limit, offset) ready to bind to `LIMIT $n OFFSET $m`.
    pub fn bounds(&self) -> (i64, i64) {
        (i64::from(self.limit.min(MAX_LIMIT)), i64::from(self.skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cap_the_limit() {
        let p = ListParams { skip: 5, limit: 50_000 };
        assert_eq!(p.bounds(), (i64::from(MAX_LIMIT), 5));
        assert_eq!(ListParams::default().bounds(), (10, 0));
    }
}
