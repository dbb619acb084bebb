//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one simulated boss fight.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub max_health: u64,
    pub remaining_health: u64,
    pub killed: bool,
    pub steps: u64,
    /// Spawn to kill, or the whole horizon if the boss survived.
    pub hours_elapsed: f64,
    pub participants: usize,
    pub credited_total: u64,
    pub passive_credited: u64,
    pub burst_credited: u64,
    pub reconnect_credited: u64,
    pub overloads: u64,
    pub reconnects: u64,
    pub licenses: u64,
    pub amplifiers: u64,
    /// Sum of participant damage equals health lost, and never exceeds max.
    pub ledger_consistent: bool,
    pub top_contribution: f64,
    pub settlement_digest: Option<String>,
    pub weekly_buffs: usize,
    pub permanent_loot: usize,
    pub data_cores: usize,
    pub nft_artifacts: usize,
    /// Rejected actions by error code.
    pub rejections: BTreeMap<String, u64>,
}

/// Aggregated results from multiple simulated fights.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub kills: u32,
    pub ledger_violations: u32,

    pub avg_max_health: f64,
    pub avg_hours_to_kill: f64,
    pub avg_participants: f64,

    // Damage mix across all runs, as fractions of credited damage
    pub passive_share: f64,
    pub burst_share: f64,
    pub reconnect_share: f64,

    pub avg_top_contribution: f64,
    pub drops_per_run: BTreeMap<String, f64>,
    pub rejections: BTreeMap<String, u64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let killed: Vec<&RunStats> = runs.iter().filter(|r| r.killed).collect();
        let kills = killed.len() as u32;
        let ledger_violations = runs.iter().filter(|r| !r.ledger_consistent).count() as u32;

        let avg_max_health = runs.iter().map(|r| r.max_health as f64).sum::<f64>() / divisor;
        let avg_participants = runs.iter().map(|r| r.participants as f64).sum::<f64>() / divisor;
        let avg_hours_to_kill =
            killed.iter().map(|r| r.hours_elapsed).sum::<f64>() / kills.max(1) as f64;
        let avg_top_contribution =
            killed.iter().map(|r| r.top_contribution).sum::<f64>() / kills.max(1) as f64;

        let credited: u64 = runs.iter().map(|r| r.credited_total).sum();
        let share = |part: u64| {
            if credited == 0 {
                0.0
            } else {
                part as f64 / credited as f64
            }
        };
        let passive_share = share(runs.iter().map(|r| r.passive_credited).sum());
        let burst_share = share(runs.iter().map(|r| r.burst_credited).sum());
        let reconnect_share = share(runs.iter().map(|r| r.reconnect_credited).sum());

        let mut drops_per_run = BTreeMap::new();
        let categories: [(&str, fn(&RunStats) -> usize); 4] = [
            ("weekly_buff", |r| r.weekly_buffs),
            ("permanent_loot", |r| r.permanent_loot),
            ("data_core", |r| r.data_cores),
            ("nft_artifact", |r| r.nft_artifacts),
        ];
        for (name, count) in categories {
            let total: usize = runs.iter().map(count).sum();
            drops_per_run.insert(name.to_string(), total as f64 / divisor);
        }

        let mut rejections = BTreeMap::new();
        for run in &runs {
            for (code, n) in &run.rejections {
                *rejections.entry(code.clone()).or_insert(0) += n;
            }
        }

        Self {
            num_runs,
            kills,
            ledger_violations,
            avg_max_health,
            avg_hours_to_kill,
            avg_participants,
            passive_share,
            burst_share,
            reconnect_share,
            avg_top_contribution,
            drops_per_run,
            rejections,
            run_stats: runs,
        }
    }

    pub fn kill_rate(&self) -> f64 {
        if self.num_runs == 0 {
            return 0.0;
        }
        self.kills as f64 / self.num_runs as f64
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  WORLD BOSS SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} killed, {} survived\n\n",
            self.num_runs,
            self.kills,
            self.num_runs - self.kills
        ));

        report.push_str("── FIGHT ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Boss HP:         {:.0}\n", self.avg_max_health));
        report.push_str(&format!("  Avg Participants:    {:.1}\n", self.avg_participants));
        report.push_str(&format!("  Avg Hours to Kill:   {:.1}\n", self.avg_hours_to_kill));
        report.push_str(&format!(
            "  Avg Top Contributor: {:.1}%\n\n",
            self.avg_top_contribution * 100.0
        ));

        report.push_str("── DAMAGE MIX ───────────────────────────────────────────────────\n");
        for (label, share) in [
            ("Passive", self.passive_share),
            ("OVERLOAD", self.burst_share),
            ("Reconnect", self.reconnect_share),
        ] {
            let bar = "█".repeat((share * 40.0) as usize);
            report.push_str(&format!("  {:<10} {:>5.1}% {}\n", label, share * 100.0, bar));
        }
        report.push('\n');

        report.push_str("── DROPS PER RUN ────────────────────────────────────────────────\n");
        for (category, avg) in &self.drops_per_run {
            report.push_str(&format!("  {:<15} {:.2}\n", category, avg));
        }
        report.push('\n');

        if !self.rejections.is_empty() {
            report.push_str("── REJECTED ACTIONS ─────────────────────────────────────────────\n");
            for (code, n) in &self.rejections {
                report.push_str(&format!("  {:<24} {}\n", code, n));
            }
            report.push('\n');
        }

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let kill_rating = if self.kill_rate() >= 0.95 && self.avg_hours_to_kill < 12.0 {
            "TOO EASY - Boss dies early on Saturday"
        } else if self.kill_rate() >= 0.8 {
            "GOOD - Boss usually falls within the weekend"
        } else if self.kill_rate() > 0.0 {
            "HARD - Boss often survives the weekend"
        } else {
            "TOO HARD - Boss never dies"
        };
        report.push_str(&format!("  Kill Rate:       {:.1}%\n", self.kill_rate() * 100.0));
        report.push_str(&format!("  Rating:          {}\n", kill_rating));
        if self.burst_share > 0.5 {
            report.push_str("  ⚠️  OVERLOAD outweighs passive damage - burst too strong?\n");
        }
        if self.ledger_violations > 0 {
            report.push_str(&format!(
                "  ⚠️  {} runs ended with an inconsistent ledger\n",
                self.ledger_violations
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
