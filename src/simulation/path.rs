//! Single-path monthly state machine for the Monte Carlo engine

use rand::Rng;

use super::engine::SimulationConfig;
use super::random::{emergency_cost, emergency_triggered, monthly_investment_return, normal_variate};
use super::results::{SimulationResult, TrajectoryType};

/// Months of expenses to hold as the target cash buffer
pub const CASH_BUFFER_MONTHS: f64 = 3.0;

/// Final net worth above this multiple of the starting net worth classifies
/// the path as growing
const GROWTH_MULTIPLE: f64 = 1.5;

/// Simulate one monthly path.
///
/// Each month: shock income and expenses, possibly add an emergency cost,
/// grow investments by the GBM factor (before cash flow netting, so growth is
/// independent of the month's savings or withdrawal), net the cash flow, then
/// rebalance against the cash buffer. The path terminates early when combined
/// cash and investments reach zero.
pub fn simulate_path<R: Rng>(config: &SimulationConfig, run_id: u32, rng: &mut R) -> SimulationResult {
    let horizon = config.time_horizon_months;

    let mut cash = config.current_cash;
    let mut investments = config.current_investments;
    let mut base_expenses = config.monthly_expenses;

    let mut monthly_balances = Vec::with_capacity(horizon as usize);
    let mut monthly_net_worth = Vec::with_capacity(horizon as usize);
    let mut emergency_count = 0u32;
    let mut months_of_runway = horizon;
    let mut depleted = false;

    for month in 1..=horizon {
        if let Some(inflation) = config.inflation_rate {
            base_expenses *= 1.0 + inflation / 12.0;
        }

        let income_shock = normal_variate(rng, 0.0, config.income_volatility);
        let actual_income = config.monthly_income * (1.0 + income_shock);

        let expense_shock = normal_variate(rng, 0.0, config.expense_volatility);
        let actual_expenses = base_expenses * (1.0 + expense_shock);

        let emergency = if emergency_triggered(rng, config.emergency_probability_monthly) {
            emergency_count += 1;
            emergency_cost(rng, config.emergency_mean_cost, config.emergency_std_dev)
        } else {
            0.0
        };

        // Growth applies to the pre-netting investment balance
        investments *= monthly_investment_return(
            rng,
            config.investment_return_annual,
            config.investment_volatility_annual,
        );

        let net_cash_flow = actual_income - (actual_expenses + emergency);
        cash += net_cash_flow;

        let buffer = base_expenses * CASH_BUFFER_MONTHS;
        if cash < 0.0 {
            // Sell investments to cover the deficit
            let deficit = -cash;
            if investments >= deficit {
                investments -= deficit;
                cash = 0.0;
            } else {
                cash = 0.0;
                investments = 0.0;
                monthly_balances.push(0.0);
                monthly_net_worth.push(0.0);
                months_of_runway = month;
                depleted = true;
                break;
            }
        } else if cash > buffer && net_cash_flow > 0.0 {
            // Sweep surplus above the buffer, capped at this month's savings
            let sweep = (cash - buffer).min(net_cash_flow);
            cash -= sweep;
            investments += sweep;
        }

        let net_worth = cash + investments;
        monthly_balances.push(cash);
        monthly_net_worth.push(net_worth);

        if net_worth <= 0.0 {
            months_of_runway = month;
            depleted = true;
            break;
        }
    }

    let final_balance = monthly_net_worth.last().copied().unwrap_or(0.0);
    let trajectory_type = if depleted {
        TrajectoryType::Depleted
    } else if final_balance > config.current_net_worth * GROWTH_MULTIPLE {
        TrajectoryType::Growing
    } else {
        TrajectoryType::Success
    };

    SimulationResult {
        run_id,
        months_of_runway,
        final_balance,
        monthly_balances,
        monthly_net_worth,
        emergency_count,
        trajectory_type,
    }
}
