//! End-to-end runs of the engine against the in-memory directory.

mod common;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bulk_delete_core::{
    ActionOrchestrator, ActionOutcome, CleanupRun, CoreError, DirectoryError, EntityKind,
    FilterConfig, OutcomeKind, ProductCategory, SkipReason,
};
use common::{org, project, Call, FakeDirectory};

fn run(directory: &FakeDirectory, config: &FilterConfig) -> bulk_delete_core::RunReport {
    CleanupRun::new(directory, config)
        .run(&directory.organizations())
        .unwrap()
}

#[test]
fn test_dry_run_deactivates_matching_npm_project_without_calls() {
    let directory = FakeDirectory::new().with_org(
        org("o1", "acme"),
        vec![project("p1", "acme/web:package.json", "npm")],
    );
    let config = FilterConfig::builder()
        .org("acme")
        .product(ProductCategory::Opensource)
        .build()
        .unwrap();

    let report = run(&directory, &config);
    let summary = report.summarize();

    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deactivated), 1);
    assert_eq!(directory.mutation_count(), 0);
    assert_eq!(directory.remaining_projects("o1"), 1);
}

#[test]
fn test_unknown_type_is_skipped() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "acme"), vec![project("p1", "tool", "exotic-tool")]);
    let config = FilterConfig::builder().org("acme").force(true).build().unwrap();

    let report = run(&directory, &config);

    let skipped = report.entities(EntityKind::Project, OutcomeKind::Skipped);
    assert_eq!(skipped.len(), 1);
    assert_eq!(
        skipped[0].outcome,
        ActionOutcome::Skipped(SkipReason::UnknownCategory)
    );
    assert_eq!(directory.mutation_count(), 0);
}

#[test]
fn test_delete_inactive_only_mode() {
    let directory = FakeDirectory::new().with_org(
        org("o1", "acme"),
        vec![
            project("inactive", "acme/old", "maven").with_monitored(false),
            project("active", "acme/new", "maven"),
        ],
    );
    let config = FilterConfig::builder()
        .org("acme")
        .delete_inactive_only(true)
        .force(true)
        .build()
        .unwrap();

    let report = run(&directory, &config);

    assert_eq!(
        report.entities(EntityKind::Project, OutcomeKind::Deleted)[0].id,
        "inactive"
    );
    assert_eq!(
        report.entities(EntityKind::Project, OutcomeKind::Skipped)[0].outcome,
        ActionOutcome::Skipped(SkipReason::ActiveProject)
    );
    assert_eq!(directory.calls().iter().filter(|c| c.is_mutation()).count(), 1);
    assert_eq!(directory.remaining_projects("o1"), 1);
}

#[test]
fn test_dry_run_and_forced_run_record_the_same_counts() {
    let build = || {
        FakeDirectory::new()
            .with_org(
                org("o1", "acme"),
                vec![
                    project("p1", "acme/web", "npm"),
                    project("p2", "acme/api", "gomodules"),
                    project("p3", "acme/img", "dockerfile"),
                    project("p4", "acme/public", "npm").with_read_only(true),
                ],
            )
            .with_org(
                org("o2", "beta"),
                vec![project("p5", "beta/infra", "terraformconfig")],
            )
    };
    let config = |force: bool| {
        FilterConfig::builder()
            .org("!")
            .exclude_product(ProductCategory::Container)
            .delete(true)
            .delete_empty_orgs(true)
            .force(force)
            .build()
            .unwrap()
    };

    let dry_directory = build();
    let dry = run(&dry_directory, &config(false)).summarize();
    let forced_directory = build();
    let forced = run(&forced_directory, &config(true)).summarize();

    assert_eq!(dry, forced);
    assert_eq!(dry_directory.mutation_count(), 0);
    assert_eq!(forced.count(EntityKind::Project, OutcomeKind::Deleted), 3);
    assert_eq!(forced.count(EntityKind::Project, OutcomeKind::Skipped), 2);
    assert_eq!(forced.count(EntityKind::Organization, OutcomeKind::Deleted), 1);
    assert!(forced_directory
        .calls()
        .contains(&Call::DeleteOrganization("o2".into())));
}

#[test]
fn test_mutation_failure_does_not_abort_the_run() {
    let directory = FakeDirectory::new()
        .with_org(
            org("o1", "acme"),
            vec![
                project("p1", "acme/a", "npm"),
                project("p2", "acme/b", "npm"),
                project("p3", "acme/c", "npm"),
            ],
        )
        .failing_on("p2");
    let config = FilterConfig::builder()
        .org("acme")
        .delete(true)
        .force(true)
        .build()
        .unwrap();

    let report = run(&directory, &config);
    let summary = report.summarize();

    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deleted), 2);
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Failed), 1);
    let failed = &report.entities(EntityKind::Project, OutcomeKind::Failed)[0];
    assert_eq!(failed.id, "p2");
    assert!(matches!(
        failed.outcome,
        ActionOutcome::Failed(DirectoryError::Transport(_))
    ));
    // one call per decision, no retry
    assert_eq!(directory.mutation_count(), 3);
}

#[test]
fn test_counts_equal_terminal_transitions() {
    let directory = FakeDirectory::new()
        .with_org(
            org("o1", "acme"),
            vec![
                project("p1", "acme/a", "npm"),
                project("p2", "acme/b", "npm").with_monitored(false),
                project("p3", "acme/c", "sast"),
                project("p4", "acme/d", "rpm"),
            ],
        )
        .failing_on("p4");
    let config = FilterConfig::builder().org("acme").force(true).build().unwrap();

    let summary = run(&directory, &config).summarize();

    assert_eq!(summary.total(EntityKind::Project), 4);
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deactivated), 2);
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Skipped), 1);
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Failed), 1);
}

#[test]
fn test_excluded_and_unselected_orgs_are_never_listed() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "acme"), vec![project("p1", "a", "npm")])
        .with_org(org("o2", "beta"), vec![project("p2", "b", "npm")])
        .with_org(org("o3", "gamma"), vec![project("p3", "c", "npm")]);
    let config = FilterConfig::builder()
        .org("acme")
        .org("beta")
        .exclude_org("beta")
        .build()
        .unwrap();

    run(&directory, &config);

    assert_eq!(directory.calls(), vec![Call::ListProjects("o1".into())]);
}

#[test]
fn test_non_empty_org_is_left_untouched() {
    let directory = FakeDirectory::new().with_org(
        org("o1", "acme"),
        vec![project("keep", "acme/keep-me", "npm"), project("p2", "acme/x", "npm")],
    );
    let config = FilterConfig::builder()
        .org("acme")
        .exclude_name("KEEP")
        .delete(true)
        .delete_empty_orgs(true)
        .force(true)
        .build()
        .unwrap();

    let summary = run(&directory, &config).summarize();

    assert_eq!(summary.total(EntityKind::Organization), 0);
    assert_eq!(directory.remaining_projects("o1"), 1);
    assert!(!directory
        .calls()
        .iter()
        .any(|c| matches!(c, Call::DeleteOrganization(_))));
}

#[test]
fn test_empty_org_cleanup_without_project_filters() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "empty"), vec![])
        .with_org(org("o2", "busy"), vec![project("p1", "x", "npm")]);
    let config = FilterConfig::builder()
        .org("!")
        .delete_empty_orgs(true)
        .force(true)
        .build()
        .unwrap();

    let report = run(&directory, &config);

    let deleted = report.entities(EntityKind::Organization, OutcomeKind::Deleted);
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id, "o1");
    // the busy org's active project is deactivated, not deleted
    assert_eq!(
        report.summarize().count(EntityKind::Project, OutcomeKind::Deactivated),
        1
    );
}

#[test]
fn test_org_delete_failure_is_recorded() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "empty"), vec![])
        .failing_on("o1");
    let config = FilterConfig::builder()
        .delete_empty_orgs(true)
        .org("empty")
        .force(true)
        .build()
        .unwrap();

    let summary = run(&directory, &config).summarize();

    assert_eq!(summary.count(EntityKind::Organization, OutcomeKind::Failed), 1);
}

#[test]
fn test_cleanup_requery_failure_is_recorded() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "acme"), vec![])
        .failing_list("o1");
    let config = FilterConfig::builder()
        .org("acme")
        .delete_empty_orgs(true)
        .build()
        .unwrap();
    let orchestrator = ActionOrchestrator::new(&directory, &config);

    let outcome = orchestrator.cleanup_organization(&org("o1", "acme"), &Default::default());

    assert!(matches!(outcome, Some(ActionOutcome::Failed(_))));
}

#[test]
fn test_listing_failure_skips_only_that_org() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "broken"), vec![project("p1", "a", "npm")])
        .with_org(org("o2", "fine"), vec![project("p2", "b", "npm")])
        .failing_list("o1");
    let config = FilterConfig::builder().org("!").build().unwrap();

    let report = run(&directory, &config);

    assert!(!report.contains(EntityKind::Project, "p1"));
    assert!(report.contains(EntityKind::Project, "p2"));
}

#[test]
fn test_auth_failure_while_listing_projects_is_fatal() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "acme"), vec![project("p1", "a", "npm")])
        .with_auth_failure();
    let config = FilterConfig::builder().org("acme").build().unwrap();
    let orgs = vec![org("o1", "acme")];

    let aborted = CleanupRun::new(&directory, &config).run(&orgs).unwrap_err();

    assert!(matches!(aborted.error, CoreError::Directory(DirectoryError::Auth(_))));
    assert_eq!(aborted.report.summarize().total(EntityKind::Project), 0);
}

#[test]
fn test_malformed_created_at_stops_the_run() {
    let directory = FakeDirectory::new().with_org(
        org("o1", "acme"),
        vec![
            project("p1", "a", "npm"),
            project("p2", "b", "npm").with_created_at("15/06/2023"),
            project("p3", "c", "npm"),
        ],
    );
    let config = FilterConfig::builder().org("acme").force(true).build().unwrap();

    let aborted = CleanupRun::new(&directory, &config)
        .run(&directory.organizations())
        .unwrap_err();

    assert!(matches!(aborted.error, CoreError::DateParse { .. }));
    assert_eq!(
        directory.calls(),
        vec![Call::ListProjects("o1".into()), Call::Deactivate("p1".into())]
    );
}

#[test]
fn test_fatal_error_keeps_outcomes_already_applied() {
    let directory = FakeDirectory::new().with_org(
        org("o1", "acme"),
        vec![
            project("p1", "a", "npm"),
            project("p2", "b", "npm").with_created_at("15/06/2023"),
        ],
    );
    let config = FilterConfig::builder()
        .org("acme")
        .delete(true)
        .force(true)
        .build()
        .unwrap();

    let aborted = CleanupRun::new(&directory, &config)
        .run(&directory.organizations())
        .unwrap_err();
    let summary = aborted.report.summarize();

    assert!(matches!(aborted.error, CoreError::DateParse { .. }));
    assert_eq!(
        directory.calls(),
        vec![Call::ListProjects("o1".into()), Call::DeleteProject("p1".into())]
    );
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deleted), 1);
    assert!(summary.lines().contains(&"Projects - Deleted: 1".to_string()));
    assert!(!aborted.report.contains(EntityKind::Project, "p2"));
}

#[test]
fn test_forced_cleanup_trusts_the_fresh_listing() {
    let directory = FakeDirectory::new()
        .with_org(org("o1", "acme"), vec![project("p1", "a", "npm")])
        .with_stale_listing();
    let config = FilterConfig::builder()
        .org("acme")
        .delete(true)
        .delete_empty_orgs(true)
        .force(true)
        .build()
        .unwrap();

    let summary = run(&directory, &config).summarize();

    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deleted), 1);
    assert_eq!(summary.total(EntityKind::Organization), 0);
    assert!(!directory
        .calls()
        .iter()
        .any(|c| matches!(c, Call::DeleteOrganization(_))));
}

#[test]
fn test_interrupt_stops_iteration_and_keeps_partial_report() {
    let cancel = Arc::new(AtomicBool::new(false));
    let directory = FakeDirectory::new()
        .with_org(
            org("o1", "acme"),
            vec![project("p1", "a", "npm"), project("p2", "b", "npm")],
        )
        .with_org(org("o2", "beta"), vec![project("p3", "c", "npm")])
        .cancel_on_mutation(Arc::clone(&cancel));
    let config = FilterConfig::builder()
        .org("!")
        .delete_empty_orgs(true)
        .force(true)
        .build()
        .unwrap();

    let report = CleanupRun::new(&directory, &config)
        .with_cancel_flag(cancel)
        .run(&directory.organizations())
        .unwrap();
    let summary = report.summarize();

    assert!(summary.interrupted());
    assert_eq!(summary.count(EntityKind::Project, OutcomeKind::Deactivated), 1);
    assert_eq!(summary.total(EntityKind::Project), 1);
    assert_eq!(summary.total(EntityKind::Organization), 0);
    assert_eq!(directory.mutation_count(), 1);
}

#[test]
fn test_cancelled_before_start_processes_nothing() {
    let directory =
        FakeDirectory::new().with_org(org("o1", "acme"), vec![project("p1", "a", "npm")]);
    let config = FilterConfig::builder().org("acme").build().unwrap();
    let run = CleanupRun::new(&directory, &config);
    run.cancel_flag()
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let report = run.run(&directory.organizations()).unwrap();

    assert!(report.interrupted());
    assert!(directory.calls().is_empty());
}
