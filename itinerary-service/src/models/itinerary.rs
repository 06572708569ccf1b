//! The structured trip plan produced by the model.
//!
//! These types describe what the prompt asks for. Nothing checks the model
//! actually produced it until the plan is rendered for display.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub destination: String,
    pub duration: u32,
    pub budget: f64,
    #[serde(default)]
    pub itinerary: Vec<DayPlan>,
    #[serde(default)]
    pub budget_breakdown: Vec<BudgetLine>,
    pub total_cost: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A money figure as the model wrote it. Usually a number, but chat models
/// also answer with text such as `"Free"` or `"$1,200"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value, reading text like `"$1,200.50"` when it holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(text) => text
                .trim()
                .trim_start_matches('$')
                .replace(',', "")
                .parse()
                .ok(),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => f.write_str(&format_amount(*n)),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

impl Itinerary {
    /// `None` when the total is not a number.
    pub fn is_within_budget(&self) -> Option<bool> {
        self.total_cost.as_number().map(|total| total <= self.budget)
    }

    /// How far the total exceeds the budget; zero when within it or unknown.
    pub fn overage(&self) -> f64 {
        self.total_cost
            .as_number()
            .map(|total| (total - self.budget).max(0.0))
            .unwrap_or(0.0)
    }

    /// "✓ Within budget" or "⚠ Over budget by $X.XX"; `None` when the total
    /// cannot be compared.
    pub fn budget_status(&self) -> Option<String> {
        self.is_within_budget().map(|within| {
            if within {
                "✓ Within budget".to_string()
            } else {
                format!("⚠ Over budget by ${:.2}", self.overage())
            }
        })
    }
}

/// Formats an amount the way the plan quotes it: whole numbers without
/// decimals, everything else as-is.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("${:.0}", amount)
    } else {
        format!("${}", amount)
    }
}
