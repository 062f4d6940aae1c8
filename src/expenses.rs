use serde::{Deserialize, Serialize};

pub const SALARY_PER_HEAD: i64 = 1_200;
pub const SERVER_COST_COEFFICIENT: i64 = 500;
pub const MARKETING_COST: i64 = 5_000;

/// Monthly burn, split by cost line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expenses {
    pub salary: i64,
    pub server: i64,
    pub marketing: i64,
    pub total: i64,
}

// Server cost is quadratic in the month.
pub fn calculate_expenses(team: u32, month: u32) -> Expenses {
    let salary = i64::from(team) * SALARY_PER_HEAD;
    let server = i64::from(month).pow(2) * SERVER_COST_COEFFICIENT;
    let marketing = MARKETING_COST;

    Expenses {
        salary,
        server,
        marketing,
        total: salary + server + marketing,
    }
}
