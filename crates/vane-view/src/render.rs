//! Renderer — textual layout of a rollout snapshot.
//!
//! ```text
//! Start Time:          2024-05-01T10:00:00Z
//! Workload:            checkout
//! Cluster ID:          prod-eu
//! Namespace:           shop
//! Strategy:            canary
//! Status:              ◷ In progress
//! Phases:              2/3
//!
//! Canary:
//!   Version:           v2
//!   TrafficPercentage: 20
//!   Replicas:          Desired: 2 | Ready: 1 | InProgress: 1 | Failed: 0
//! Stable:
//!   ...
//!
//!   PHASE     NAME     STATUS         WEIGHT  METRICS     VERIFICATION  VERIFICATION
//!                                                         PROVIDER      STATUS
//! │ Phase 01  phase-1  ✔ Finished     20%
//! │──────────  ...
//! └──────────  ...
//! ```
//!
//! Rendering is pure: the same snapshot always yields the same text.

use colored::Color;

use vane_core::{
    DetailedRollout, Phase, RolloutStatus, StrategyKind, Verification, VersionStatus,
};

use crate::derive::{active_phase_index, derive_phases};
use crate::rank::rank_verifications;
use crate::style::{Icon, Palette, humanize, plain_with_icon};
use crate::table::{Cell, Table};

/// Width of the label column in the header and version blocks.
const LABEL_WIDTH: usize = 21;
const STUB: &str = "--";
const SEPARATOR: &str = "──────────";
const ROW_PREFIX: &str = "│";
const LAST_ROW_PREFIX: &str = "└";
const PHASE_COLUMNS: usize = 7;

/// Renders snapshots with a fixed palette.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Lay out the full view of `snapshot`.
    pub fn render(&self, snapshot: &DetailedRollout) -> String {
        let phases = derive_phases(snapshot.rollout.status, &snapshot.phases);

        let mut out = String::new();
        self.header(&mut out, snapshot, &phases);
        out.push('\n');
        self.version_blocks(&mut out, snapshot);

        let background = snapshot.background_verifications();
        if !background.is_empty() {
            out.push('\n');
            self.background_table(&mut out, background);
        }

        out.push('\n');
        self.phase_table(&mut out, snapshot, &phases);
        out
    }

    // ── Header ─────────────────────────────────────────────────────

    fn header(&self, out: &mut String, snapshot: &DetailedRollout, phases: &[Phase]) {
        let rollout = &snapshot.rollout;

        field(out, "Start Time:", &rollout.start_time);
        if !rollout.end_time.is_empty() {
            field(out, "End Time:", &rollout.end_time);
        }
        field(out, "Workload:", &rollout.workload);
        field(out, "Cluster ID:", &rollout.cluster_id);
        field(out, "Namespace:", &rollout.namespace);
        field(out, "Strategy:", &strategy_label(snapshot));

        let status = self.palette.with_icon(
            Icon::for_rollout(rollout.status),
            &humanize(rollout.status.as_str()),
        );
        field(out, "Status:", &status);

        let counter = if snapshot.is_terminal() {
            phases.len().to_string()
        } else {
            format!("{}/{}", active_phase_index(phases), phases.len())
        };
        field(out, "Phases:", &counter);
    }

    // ── Version blocks ─────────────────────────────────────────────

    fn version_blocks(&self, out: &mut String, snapshot: &DetailedRollout) {
        let rollout = &snapshot.rollout;
        let kind = snapshot.strategy_kind();

        if snapshot.is_terminal() {
            let label = match kind {
                StrategyKind::Canary => "Stable:",
                StrategyKind::RollingUpdate if rollout.status == RolloutStatus::Finished => "New:",
                StrategyKind::RollingUpdate => "Old:",
            };
            self.version_block(out, label, &rollout.stable_version_status, Color::Green);
            return;
        }

        let (new_label, stable_label) = match kind {
            StrategyKind::Canary => ("Canary:", "Stable:"),
            StrategyKind::RollingUpdate => ("New:", "Old:"),
        };
        self.version_block(out, new_label, &rollout.new_version_status, Color::Yellow);
        self.version_block(out, stable_label, &rollout.stable_version_status, Color::Green);
    }

    fn version_block(&self, out: &mut String, label: &str, status: &VersionStatus, color: Color) {
        out.push_str(&self.palette.bold(label));
        out.push('\n');
        field(out, "  Version:", &self.palette.paint(&status.version, color));
        field(out, "  TrafficPercentage:", &status.traffic_percentage.to_string());
        if !status.service_name.is_empty() {
            field(out, "  ServiceName:", &status.service_name);
        }
        let replicas = &status.replicas;
        field(
            out,
            "  Replicas:",
            &format!(
                "Desired: {} | Ready: {} | InProgress: {} | Failed: {}",
                replicas.desired, replicas.ready, replicas.in_progress, replicas.failed
            ),
        );
    }

    // ── Background verifications ───────────────────────────────────

    fn background_table(&self, out: &mut String, background: Vec<&Verification>) {
        out.push_str(&self.palette.bold("BackgroundVerification:"));
        out.push('\n');

        let mut table = Table::indented("  ");
        table.push(vec![
            Cell::plain("METRICS"),
            Cell::plain("VERIFICATION PROVIDER"),
            Cell::plain("VERIFICATION STATUS"),
        ]);
        for verification in rank_verifications(background) {
            table.push(vec![
                Cell::plain(verification.metric_name.as_str()),
                Cell::plain(verification.provider.as_str()),
                self.verification_status(verification),
            ]);
        }
        table.render_into(out);
    }

    // ── Phase table ────────────────────────────────────────────────

    fn phase_table(&self, out: &mut String, snapshot: &DetailedRollout, phases: &[Phase]) {
        let mut table = Table::new();
        table.push(
            ["  PHASE", "NAME", "STATUS", "WEIGHT", "METRICS", "VERIFICATION", "VERIFICATION"]
                .into_iter()
                .map(|h| self.bold_cell(h))
                .collect(),
        );
        table.push(
            ["", "", "", "", "", "PROVIDER", "STATUS"]
                .into_iter()
                .map(|h| self.bold_cell(h))
                .collect(),
        );

        for (index, phase) in phases.iter().enumerate() {
            table.push(self.phase_row(index, phase));

            for verification in rank_verifications(&phase.verifications) {
                table.push(sub_row(
                    Cell::plain(verification.metric_name.as_str()),
                    Cell::plain(verification.provider.as_str()),
                    self.verification_status(verification),
                ));
            }

            if phase.verifications.is_empty() {
                if let Some(strategy) = &snapshot.strategy {
                    let matches = strategy.header_matches_for(&phase.name);
                    if !matches.is_empty() {
                        let rendered: Vec<String> = matches.iter().map(ToString::to_string).collect();
                        table.push(sub_row(
                            Cell::plain("header-route"),
                            Cell::plain(rendered.join(", ")),
                            Cell::empty(),
                        ));
                    }
                }
            }

            let prefix = if index + 1 == phases.len() {
                LAST_ROW_PREFIX
            } else {
                ROW_PREFIX
            };
            let mut separator = vec![Cell::plain(format!("{prefix}{SEPARATOR}"))];
            separator.extend((1..PHASE_COLUMNS).map(|_| Cell::plain(SEPARATOR)));
            table.push(separator);
        }

        table.render_into(out);
    }

    fn phase_row(&self, index: usize, phase: &Phase) -> Vec<Cell> {
        let number = format!("{ROW_PREFIX} Phase {:02}", index + 1);
        let name = if phase.name.is_empty() {
            STUB
        } else {
            phase.name.as_str()
        };
        let weight = if phase.traffic_percentage < 1 {
            STUB.to_string()
        } else {
            format!("{}%", phase.traffic_percentage)
        };

        let icon = Icon::for_phase(phase.status);
        let status = humanize(phase.status.as_str());

        vec![
            self.bold_cell(&number),
            self.bold_cell(name),
            Cell::styled(
                &plain_with_icon(icon, &status),
                self.palette.with_icon(icon, &self.palette.bold(&status)),
            ),
            self.bold_cell(&weight),
        ]
    }

    fn verification_status(&self, verification: &Verification) -> Cell {
        let icon = Icon::for_verification(verification.status);
        let label = verification.status.label();
        Cell::styled(&plain_with_icon(icon, label), self.palette.with_icon(icon, label))
    }

    fn bold_cell(&self, text: &str) -> Cell {
        Cell::styled(text, self.palette.bold(text))
    }
}

/// A nested row under a phase, filling the last three columns.
fn sub_row(metric: Cell, provider: Cell, status: Cell) -> Vec<Cell> {
    vec![
        Cell::plain(ROW_PREFIX),
        Cell::empty(),
        Cell::empty(),
        Cell::empty(),
        metric,
        provider,
        status,
    ]
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<LABEL_WIDTH$}{value}\n"));
}

/// The rollout's own strategy label, or the parsed kind when it has none.
fn strategy_label(snapshot: &DetailedRollout) -> String {
    if !snapshot.rollout.strategy.is_empty() {
        return snapshot.rollout.strategy.clone();
    }
    match snapshot.strategy_kind() {
        StrategyKind::Canary => "canary".to_string(),
        StrategyKind::RollingUpdate => "rolling".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vane_core::{
        BACKGROUND_STEP, HeaderMatch, HeaderValue, PhaseStatus, ReplicasInfo, Rollout,
        SetHeaderRoute, Step, Strategy, StrategySteps, VerificationStatus,
    };

    fn verification(metric: &str, status: VerificationStatus) -> Verification {
        Verification {
            metric_name: metric.to_string(),
            provider: "prometheus".to_string(),
            status,
            ..Default::default()
        }
    }

    fn snapshot(status: RolloutStatus) -> DetailedRollout {
        DetailedRollout {
            rollout: Rollout {
                id: "rol-abc".to_string(),
                status,
                workload: "checkout".to_string(),
                start_time: "2024-05-01T10:00:00Z".to_string(),
                cluster_id: "prod-eu".to_string(),
                namespace: "shop".to_string(),
                strategy: "canary".to_string(),
                new_version_status: VersionStatus {
                    version: "v2".to_string(),
                    service_name: "checkout-canary".to_string(),
                    traffic_percentage: 20,
                    replicas: ReplicasInfo {
                        desired: 2,
                        ready: 1,
                        in_progress: 1,
                        failed: 0,
                    },
                },
                stable_version_status: VersionStatus {
                    version: "v1".to_string(),
                    traffic_percentage: 80,
                    ..Default::default()
                },
                ..Default::default()
            },
            phases: vec![
                Phase {
                    name: "phase-1".to_string(),
                    status: PhaseStatus::Finished,
                    traffic_percentage: 20,
                    ..Default::default()
                },
                Phase {
                    name: "phase-2".to_string(),
                    status: PhaseStatus::InProgress,
                    traffic_percentage: 50,
                    verifications: vec![
                        verification("latency", VerificationStatus::Running),
                        verification("error-rate", VerificationStatus::Failed),
                    ],
                    ..Default::default()
                },
                Phase {
                    name: String::new(),
                    status: PhaseStatus::Pending,
                    traffic_percentage: 0,
                    ..Default::default()
                },
            ],
            verifications: Vec::new(),
            strategy: None,
        }
    }

    fn render(snapshot: &DetailedRollout) -> String {
        Renderer::new(Palette::plain()).render(snapshot)
    }

    fn line_starting<'a>(out: &'a str, prefix: &str) -> &'a str {
        out.lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in\n{out}"))
    }

    #[test]
    fn header_block() {
        let out = render(&snapshot(RolloutStatus::InProgress));
        assert!(out.starts_with("Start Time:          2024-05-01T10:00:00Z\n"));
        assert!(!out.contains("End Time:"));
        assert_eq!(line_starting(&out, "Workload:"), "Workload:            checkout");
        assert_eq!(line_starting(&out, "Status:"), "Status:              ◷ In progress");
        assert_eq!(line_starting(&out, "Phases:"), "Phases:              2/3");
    }

    #[test]
    fn terminal_rollout_shows_phase_total() {
        let mut snapshot = snapshot(RolloutStatus::Finished);
        snapshot.rollout.end_time = "2024-05-01T11:00:00Z".to_string();
        let out = render(&snapshot);
        assert_eq!(line_starting(&out, "End Time:"), "End Time:            2024-05-01T11:00:00Z");
        assert_eq!(line_starting(&out, "Status:"), "Status:              ✔ Finished");
        assert_eq!(line_starting(&out, "Phases:"), "Phases:              3");
    }

    #[test]
    fn in_flight_canary_shows_both_versions() {
        let out = render(&snapshot(RolloutStatus::InProgress));
        let canary = out.find("Canary:\n").unwrap();
        let stable = out.find("Stable:\n").unwrap();
        assert!(canary < stable);
        assert!(out.contains("  Version:           v2\n"));
        assert!(out.contains("  ServiceName:       checkout-canary\n"));
        assert!(out.contains("  Replicas:          Desired: 2 | Ready: 1 | InProgress: 1 | Failed: 0\n"));
        assert!(out.contains("  TrafficPercentage: 80\n"));
    }

    #[test]
    fn terminal_rollout_shows_stable_only() {
        let out = render(&snapshot(RolloutStatus::Aborted));
        assert!(!out.contains("Canary:"));
        assert!(out.contains("Stable:\n"));
        assert!(!out.contains("v2"));
    }

    #[test]
    fn rolling_update_labels() {
        let mut snapshot = snapshot(RolloutStatus::InProgress);
        snapshot.rollout.strategy = "rolling".to_string();
        let out = render(&snapshot);
        assert!(out.contains("New:\n") && out.contains("Old:\n"));

        snapshot.rollout.status = RolloutStatus::Finished;
        let out = render(&snapshot);
        assert!(out.contains("New:\n") && !out.contains("Old:\n"));

        snapshot.rollout.status = RolloutStatus::Failed;
        let out = render(&snapshot);
        assert!(out.contains("Old:\n") && !out.contains("New:\n"));
    }

    #[test]
    fn phase_rows_and_stubs() {
        let out = render(&snapshot(RolloutStatus::InProgress));
        let first = line_starting(&out, "│ Phase 01");
        assert!(first.contains("phase-1") && first.contains("✔ Finished") && first.contains("20%"));

        let third: Vec<&str> = line_starting(&out, "│ Phase 03").split_whitespace().collect();
        assert_eq!(third, ["│", "Phase", "03", "--", "◷", "Pending", "--"]);

        let last = out.lines().last().unwrap();
        assert!(last.starts_with("└──────────"));
        assert_eq!(out.matches("│──────────").count(), 2);
    }

    #[test]
    fn verifications_ranked_under_their_phase() {
        let out = render(&snapshot(RolloutStatus::InProgress));
        let failed = out.find("error-rate").unwrap();
        let running = out.find("latency").unwrap();
        assert!(failed < running);
        let row = out.lines().find(|l| l.contains("error-rate")).unwrap();
        assert!(row.starts_with("│ ") && row.contains("prometheus"), "{row}");
        assert!(out.contains("✖ FAILED"));
        assert!(out.contains("◌ RUNNING"));
    }

    #[test]
    fn aborted_rollout_marks_dropped_phases() {
        let out = render(&snapshot(RolloutStatus::Aborted));
        assert!(line_starting(&out, "│ Phase 02").contains("• Dropped"));
        assert!(line_starting(&out, "│ Phase 03").contains("• Dropped"));
        assert!(line_starting(&out, "│ Phase 01").contains("✔ Finished"));
    }

    #[test]
    fn header_route_annotation() {
        let mut snapshot = snapshot(RolloutStatus::InProgress);
        snapshot.strategy = Some(Strategy::Canary(StrategySteps {
            steps: vec![
                Step {
                    name: "phase-1".to_string(),
                    set_header_route: Some(SetHeaderRoute {
                        matches: vec![
                            HeaderMatch {
                                header_name: "x-canary".to_string(),
                                header_value: HeaderValue {
                                    exact: Some("yes".to_string()),
                                    ..Default::default()
                                },
                            },
                            HeaderMatch {
                                header_name: "x-user".to_string(),
                                header_value: HeaderValue {
                                    prefix: Some("beta-".to_string()),
                                    ..Default::default()
                                },
                            },
                        ],
                    }),
                },
                Step {
                    name: "phase-2".to_string(),
                    set_header_route: Some(SetHeaderRoute {
                        matches: vec![HeaderMatch {
                            header_name: "x-ignored".to_string(),
                            header_value: HeaderValue {
                                exact: Some("1".to_string()),
                                ..Default::default()
                            },
                        }],
                    }),
                },
            ],
        }));

        let out = render(&snapshot);
        let row = out
            .lines()
            .find(|l| l.contains("header-route"))
            .unwrap();
        assert!(row.ends_with("x-canary=exact:yes, x-user=prefix:beta-"), "{row}");
        // phase-2 has explicit verifications, so its header route stays hidden.
        assert!(!out.contains("x-ignored"));
    }

    #[test]
    fn background_verification_table() {
        let mut snapshot = snapshot(RolloutStatus::InProgress);
        let mut background = verification("saturation", VerificationStatus::Successful);
        background.step = BACKGROUND_STEP.to_string();
        let mut failing = verification("availability", VerificationStatus::Error);
        failing.step = BACKGROUND_STEP.to_string();
        snapshot.verifications = vec![background, failing];

        let out = render(&snapshot);
        assert!(out.contains("BackgroundVerification:\n"));
        assert!(out.contains("  METRICS       VERIFICATION PROVIDER  VERIFICATION STATUS\n"));
        let error = out.find("availability").unwrap();
        let ok = out.find("saturation").unwrap();
        assert!(error < ok);
        assert!(out.contains("✔ SUCCESSFUL"));
    }

    #[test]
    fn unknown_status_renders_without_icon() {
        let mut snapshot = snapshot(RolloutStatus::Unknown);
        snapshot.phases.truncate(1);
        let out = render(&snapshot);
        assert_eq!(line_starting(&out, "Status:"), "Status:              Unknown");
    }

    #[test]
    fn rendering_is_deterministic() {
        let snapshot = snapshot(RolloutStatus::InProgress);
        assert_eq!(render(&snapshot), render(&snapshot));
    }
}
