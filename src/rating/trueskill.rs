use log::debug;

use super::gaussian::{cdf, pdf, ppf};
use super::types::{Rating, SkillUpdate};
use crate::config::settings::RatingSettings;

/// TrueSkill for two players, in closed form
#[derive(Debug, Clone)]
pub struct TrueSkill {
    mu: f64,
    sigma: f64,
    beta: f64,
    tau: f64,
    draw_margin: f64,
}

impl TrueSkill {
    pub fn new(settings: &RatingSettings) -> Self {
        let draw_margin = calculate_draw_margin(settings.draw_probability, settings.beta);
        debug!(
            "TrueSkill: mu={} sigma={} beta={} tau={} draw_margin={:.4}",
            settings.mu, settings.sigma, settings.beta, settings.tau, draw_margin
        );

        Self {
            mu: settings.mu,
            sigma: settings.sigma,
            beta: settings.beta,
            tau: settings.tau,
            draw_margin,
        }
    }
}

impl Default for TrueSkill {
    fn default() -> Self {
        Self::new(&RatingSettings::default())
    }
}

impl SkillUpdate for TrueSkill {
    fn initial_rating(&self) -> Rating {
        Rating::new(self.mu, self.sigma)
    }

    fn rate_1v1(&self, winner: Rating, loser: Rating, drawn: bool) -> (Rating, Rating) {
        // Skill drift between matches
        let winner_var = winner.sigma.powi(2) + self.tau.powi(2);
        let loser_var = loser.sigma.powi(2) + self.tau.powi(2);

        let c_squared = 2.0 * self.beta.powi(2) + winner_var + loser_var;
        let c = c_squared.sqrt();
        let t = (winner.mu - loser.mu) / c;
        let epsilon = self.draw_margin / c;

        let (v, w) = if drawn {
            (v_draw(t, epsilon), w_draw(t, epsilon))
        } else {
            (v_win(t, epsilon), w_win(t, epsilon))
        };

        let updated = |mean: f64, var: f64, sign: f64| {
            Rating::new(
                mean + sign * var / c * v,
                (var * (1.0 - var / c_squared * w)).sqrt(),
            )
        };

        (updated(winner.mu, winner_var, 1.0), updated(loser.mu, loser_var, -1.0))
    }
}

/// Performance gap below which a two-player match counts as a draw
fn calculate_draw_margin(draw_probability: f64, beta: f64) -> f64 {
    ppf((draw_probability + 1.0) / 2.0) * 2f64.sqrt() * beta
}

// --- Truncated Gaussian Corrections ---

fn v_win(t: f64, epsilon: f64) -> f64 {
    let x = t - epsilon;
    let denominator = cdf(x);
    if denominator > 0.0 { pdf(x) / denominator } else { -x }
}

fn w_win(t: f64, epsilon: f64) -> f64 {
    let x = t - epsilon;
    let v = v_win(t, epsilon);
    v * (v + x)
}

fn v_draw(t: f64, epsilon: f64) -> f64 {
    let abs_t = t.abs();
    let (a, b) = (epsilon - abs_t, -epsilon - abs_t);
    let denominator = cdf(a) - cdf(b);
    let v = if denominator > 0.0 { (pdf(b) - pdf(a)) / denominator } else { a };
    if t < 0.0 { -v } else { v }
}

fn w_draw(t: f64, epsilon: f64) -> f64 {
    let abs_t = t.abs();
    let (a, b) = (epsilon - abs_t, -epsilon - abs_t);
    let denominator = cdf(a) - cdf(b);
    if denominator <= 0.0 {
        return 1.0 - f64::EPSILON;
    }
    let v = v_draw(abs_t, epsilon);
    v.powi(2) + (a * pdf(a) - b * pdf(b)) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_fresh_players_decisive() {
        let engine = TrueSkill::default();
        let fresh = engine.initial_rating();

        let (winner, loser) = engine.rate_1v1(fresh, fresh, false);

        assert!(close(winner.mu, 29.396), "winner mu {}", winner.mu);
        assert!(close(loser.mu, 20.604), "loser mu {}", loser.mu);
        assert!(close(winner.sigma, 7.171), "winner sigma {}", winner.sigma);
        assert!(close(loser.sigma, 7.171), "loser sigma {}", loser.sigma);
    }

    #[test]
    fn test_fresh_players_draw() {
        let engine = TrueSkill::default();
        let fresh = engine.initial_rating();

        let (a, b) = engine.rate_1v1(fresh, fresh, true);

        assert!(close(a.mu, 25.0) && close(b.mu, 25.0));
        assert!(close(a.sigma, 6.458), "sigma {}", a.sigma);
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_pulls_ratings_together() {
        let engine = TrueSkill::default();
        let strong = Rating::new(32.0, 4.0);
        let weak = Rating::new(20.0, 4.0);

        let (strong_after, weak_after) = engine.rate_1v1(strong, weak, true);
        assert!(strong_after.mu < strong.mu);
        assert!(weak_after.mu > weak.mu);

        let (weak_swapped, strong_swapped) = engine.rate_1v1(weak, strong, true);
        assert_eq!(weak_swapped, weak_after);
        assert_eq!(strong_swapped, strong_after);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let engine = TrueSkill::default();
        let strong = Rating::new(35.0, 3.0);
        let weak = Rating::new(15.0, 3.0);

        let (expected, _) = engine.rate_1v1(strong, weak, false);
        let (upset, _) = engine.rate_1v1(weak, strong, false);

        assert!(upset.mu - weak.mu > expected.mu - strong.mu);
        assert!(upset.sigma.is_finite() && expected.sigma.is_finite());
    }
}
