use super::support::{
    environment_with_roles, read_manifest, remove_role, write_manifest, write_role, MANIFEST,
    ROLES_DIR,
};
use std::fs;
use vagrant_roles::{Environment, EnvironmentError};

#[test]
fn available_roles_exclude_base_roles() {
    let temp = environment_with_roles(&["mail", "search", "generic", "mediawiki"]);
    let env = Environment::new(temp.path()).unwrap();
    assert_eq!(env.roles_available().unwrap(), vec!["mail", "search"]);
}

#[test]
fn available_roles_use_first_declaration_per_file() {
    let temp = environment_with_roles(&[]);
    fs::write(
        temp.path().join(ROLES_DIR).join("combo.pp"),
        "class role::alpha {}\nclass role::beta {}\n",
    )
    .unwrap();
    fs::write(temp.path().join(ROLES_DIR).join("helper.pp"), "define foo() {}\n").unwrap();

    let env = Environment::new(temp.path()).unwrap();
    assert_eq!(env.roles_available().unwrap(), vec!["alpha"]);
}

#[test]
fn enabled_roles_empty_without_manifest() {
    let temp = environment_with_roles(&["mail"]);
    let env = Environment::new(temp.path()).unwrap();
    assert!(env.roles_enabled().unwrap().is_empty());
}

#[test]
fn enabled_roles_ignore_comments_and_noise() {
    let temp = environment_with_roles(&["mail", "search"]);
    write_manifest(
        temp.path(),
        "# include role::commented\n\ninclude role::search\nnot a role\ninclude role::mail\n",
    );
    let env = Environment::new(temp.path()).unwrap();
    assert_eq!(env.roles_enabled().unwrap(), vec!["mail", "search"]);
}

#[test]
fn update_roles_writes_exact_manifest() {
    let temp = environment_with_roles(&[]);
    let env = Environment::new(temp.path()).unwrap();
    env.update_roles(["search", "role::mail", "mail"]).unwrap();

    assert_eq!(
        read_manifest(temp.path()),
        "# This file is managed by Vagrant. Do not edit.\n\
         # Use \"vagrant list-roles / enable-role / disable-role\" instead.\n\
         include role::mail\n\
         include role::search\n"
    );
}

#[test]
fn update_roles_with_empty_set_writes_header_only() {
    let temp = environment_with_roles(&[]);
    let env = Environment::new(temp.path()).unwrap();
    env.update_roles(Vec::<String>::new()).unwrap();

    assert_eq!(
        read_manifest(temp.path()),
        "# This file is managed by Vagrant. Do not edit.\n\
         # Use \"vagrant list-roles / enable-role / disable-role\" instead.\n"
    );
    assert!(env.roles_enabled().unwrap().is_empty());
}

#[test]
fn update_roles_rejects_whitespace_names() {
    let temp = environment_with_roles(&[]);
    let env = Environment::new(temp.path()).unwrap();
    let err = env.update_roles(["bad name"]).unwrap_err();
    assert!(matches!(err, EnvironmentError::InvalidRoleName(_)));
}

#[test]
fn prune_drops_deleted_role() {
    let temp = environment_with_roles(&["mail", "search"]);
    write_manifest(temp.path(), "include role::mail\ninclude role::search");
    let env = Environment::new(temp.path()).unwrap();
    assert_eq!(env.roles_enabled().unwrap(), vec!["mail", "search"]);

    remove_role(temp.path(), "search");
    let pruned = env.prune_roles().unwrap();

    assert_eq!(pruned, vec!["search"]);
    assert_eq!(env.roles_enabled().unwrap(), vec!["mail"]);
    let content = read_manifest(temp.path());
    assert!(content.contains("include role::mail\n"));
    assert!(!content.contains("search"));
}

#[test]
fn prune_is_noop_when_all_enabled_available() {
    let temp = environment_with_roles(&["mail", "search"]);
    let env = Environment::new(temp.path()).unwrap();
    env.update_roles(["mail"]).unwrap();
    let before = read_manifest(temp.path());

    assert!(env.prune_roles().unwrap().is_empty());
    assert_eq!(read_manifest(temp.path()), before);
}

#[test]
fn enable_disable_reset_cycle() {
    let temp = environment_with_roles(&["mail", "search", "wiki"]);
    let env = Environment::new(temp.path()).unwrap();

    let change = env.enable_roles(["mail", "role::search"]).unwrap();
    assert_eq!(change.changed, vec!["mail", "search"]);
    assert_eq!(env.roles_enabled().unwrap(), vec!["mail", "search"]);

    let change = env.disable_roles(["search", "wiki"]).unwrap();
    assert_eq!(change.changed, vec!["search"]);
    assert_eq!(change.unchanged, vec!["wiki"]);
    assert_eq!(env.roles_enabled().unwrap(), vec!["mail"]);

    write_role(temp.path(), "extra");
    env.enable_roles(["extra"]).unwrap();
    assert_eq!(env.reset_roles().unwrap(), vec!["extra", "mail"]);
    assert!(env.roles_enabled().unwrap().is_empty());
}

#[test]
fn role_listing_marks_enabled() {
    let temp = environment_with_roles(&["mail", "search"]);
    let env = Environment::new(temp.path()).unwrap();
    env.update_roles(["search"]).unwrap();

    let listing = env.role_listing().unwrap();
    let flags: Vec<(&str, bool)> = listing
        .iter()
        .map(|e| (e.name.as_str(), e.enabled))
        .collect();
    assert_eq!(flags, vec![("mail", false), ("search", true)]);
}

#[test]
fn commit_reads_short_master_ref() {
    let temp = environment_with_roles(&[]);
    let env = Environment::new(temp.path()).unwrap();
    assert_eq!(env.commit(), None);

    let heads = temp.path().join(".git/refs/heads");
    fs::create_dir_all(&heads).unwrap();
    fs::write(heads.join("master"), "abcdef0123456789\n").unwrap();
    assert_eq!(env.commit(), Some("abcdef012".to_string()));
}

#[test]
fn update_roles_strips_namespace_once() {
    let temp = environment_with_roles(&[]);
    let env = Environment::new(temp.path()).unwrap();
    env.update_roles(["role::role::mail"]).unwrap();

    assert!(read_manifest(temp.path()).contains("include role::role::mail\n"));
    assert_eq!(env.roles_enabled().unwrap(), vec!["role::mail"]);
}

#[test]
fn roles_enabled_propagates_io_error() {
    let temp = environment_with_roles(&["mail"]);
    fs::create_dir_all(temp.path().join(MANIFEST)).unwrap();
    let env = Environment::new(temp.path()).unwrap();

    assert!(matches!(
        env.roles_enabled().unwrap_err(),
        EnvironmentError::Io { .. }
    ));
    assert!(matches!(
        env.prune_roles().unwrap_err(),
        EnvironmentError::Io { .. }
    ));
}

#[test]
fn update_roles_propagates_io_error() {
    let temp = environment_with_roles(&["mail"]);
    fs::create_dir_all(temp.path().join(MANIFEST)).unwrap();
    let env = Environment::new(temp.path()).unwrap();

    assert!(matches!(
        env.update_roles(["mail"]).unwrap_err(),
        EnvironmentError::Io { .. }
    ));
}

#[cfg(unix)]
#[test]
fn roles_available_propagates_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp = environment_with_roles(&["mail"]);
    let file = temp.path().join(ROLES_DIR).join("mail.pp");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still read the file; nothing to observe then.
    if fs::read(&file).is_ok() {
        return;
    }

    let env = Environment::new(temp.path()).unwrap();
    match env.roles_available().unwrap_err() {
        EnvironmentError::Io { path, .. } => assert_eq!(path, file),
        other => panic!("unexpected error: {other}"),
    }
}
