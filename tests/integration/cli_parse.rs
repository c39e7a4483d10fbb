use clap::{CommandFactory, Parser};
use vagrant_roles::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["vagrant-roles", "list-roles"],
        vec!["vagrant-roles", "list-roles", "--format", "json"],
        vec!["vagrant-roles", "enable-role", "mail"],
        vec!["vagrant-roles", "enable-role", "mail", "search"],
        vec!["vagrant-roles", "disable-role", "mail"],
        vec!["vagrant-roles", "reset-roles"],
        vec!["vagrant-roles", "prune-roles"],
        vec!["vagrant-roles", "update", "--force"],
        vec!["vagrant-roles", "--root", "/srv/vagrant", "status"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_missing_role_names() {
    assert!(Cli::try_parse_from(["vagrant-roles", "enable-role"]).is_err());
    assert!(Cli::try_parse_from(["vagrant-roles", "disable-role"]).is_err());
}

#[test]
fn parse_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["vagrant-roles", "list-roles", "--format", "yaml"]).is_err());
}

#[test]
fn parse_collects_role_names() {
    let cli = Cli::try_parse_from(["vagrant-roles", "enable-role", "mail", "role::search"]).unwrap();
    match cli.command {
        Commands::EnableRole { roles } => assert_eq!(roles, vec!["mail", "role::search"]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}
