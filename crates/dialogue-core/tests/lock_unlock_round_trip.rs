use std::fs;

use dialogue_core::crypto::decrypt;
use dialogue_core::{DialogueError, Locker, Unlocked};
use tempfile::tempdir;

const PASSWORD: &[u8] = b"test-password-123";

#[test]
fn test_file_lock_unlock_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entry.md.locked");
    let plaintext = b"journal entry: hello world";
    fs::write(&path, plaintext).unwrap();

    let locker = Locker::new();
    locker.lock(&path, PASSWORD).expect("lock should succeed");

    let on_disk = fs::read(&path).unwrap();
    assert_ne!(on_disk.as_slice(), plaintext.as_slice());
    assert_eq!(decrypt(&on_disk, PASSWORD).unwrap(), plaintext);

    let destination = dir.path().join("entry.md.unlocked");
    let outcome = locker
        .unlock(&path, &destination, PASSWORD)
        .expect("unlock should succeed");

    assert_eq!(outcome, Unlocked::File);
    assert_eq!(fs::read(&destination).unwrap(), plaintext);
    assert!(path.exists(), "source container is left in place");
}

#[test]
fn test_directory_lock_unlock_round_trip() {
    for compress in [false, true] {
        let dir = tempdir().unwrap();
        let journal = dir.path().join("journal.locked");
        fs::create_dir_all(journal.join("2024")).unwrap();
        fs::write(journal.join("2024").join("01-01.md"), b"New year.").unwrap();
        fs::write(journal.join("index.md"), b"# Journal").unwrap();

        let locker = Locker::new().with_compression(compress);
        locker.lock(&journal, PASSWORD).expect("lock should succeed");
        assert!(journal.is_file(), "directory replaced by its container");

        let destination = dir.path().join("journal.unlocked");
        let outcome = locker
            .unlock(&journal, &destination, PASSWORD)
            .expect("unlock should succeed");

        assert_eq!(outcome, Unlocked::Directory);
        assert_eq!(
            fs::read(destination.join("2024").join("01-01.md")).unwrap(),
            b"New year."
        );
        assert_eq!(fs::read(destination.join("index.md")).unwrap(), b"# Journal");
    }
}

#[test]
fn test_empty_directory_lock_unlock_round_trip() {
    let dir = tempdir().unwrap();
    let journal = dir.path().join("empty.locked");
    fs::create_dir(&journal).unwrap();

    let locker = Locker::new();
    locker.lock(&journal, PASSWORD).expect("lock should succeed");

    let destination = dir.path().join("empty.unlocked");
    let outcome = locker
        .unlock(&journal, &destination, PASSWORD)
        .expect("unlock should succeed");

    assert_eq!(outcome, Unlocked::Directory);
    assert!(destination.is_dir());
    assert_eq!(fs::read_dir(&destination).unwrap().count(), 0);
}

#[test]
fn test_empty_file_lock_unlock_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.md.locked");
    fs::write(&path, b"").unwrap();

    let locker = Locker::new();
    locker.lock(&path, PASSWORD).expect("lock should succeed");

    let destination = dir.path().join("blank.md.unlocked");
    let outcome = locker
        .unlock(&path, &destination, PASSWORD)
        .expect("unlock should succeed");

    assert_eq!(outcome, Unlocked::File);
    assert_eq!(fs::read(&destination).unwrap(), b"");
}

#[test]
fn test_tampered_container_leaves_no_output() {
    let dir = tempdir().unwrap();
    let journal = dir.path().join("journal.locked");
    fs::create_dir(&journal).unwrap();
    fs::write(journal.join("secret.md"), b"secret").unwrap();

    let locker = Locker::new();
    locker.lock(&journal, PASSWORD).unwrap();

    let mut container = fs::read(&journal).unwrap();
    container[0] ^= 0x80;
    fs::write(&journal, &container).unwrap();

    let destination = dir.path().join("journal.unlocked");
    let result = locker.unlock(&journal, &destination, PASSWORD);

    assert!(matches!(result, Err(DialogueError::Authentication)));
    assert!(!destination.exists());
}

#[test]
fn test_unlock_into_occupied_destination() {
    let dir = tempdir().unwrap();
    let journal = dir.path().join("journal.locked");
    fs::create_dir(&journal).unwrap();
    fs::write(journal.join("entry.md"), b"entry").unwrap();

    let locker = Locker::new();
    locker.lock(&journal, PASSWORD).unwrap();

    let destination = dir.path().join("journal.unlocked");
    fs::write(&destination, b"not a directory").unwrap();

    let result = locker.unlock(&journal, &destination, PASSWORD);
    assert!(matches!(result, Err(DialogueError::AlreadyExists(_))));
    assert_eq!(fs::read(&destination).unwrap(), b"not a directory");
}

#[test]
fn test_file_unlock_refuses_directory_destination() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("entry.md");
    fs::write(&path, b"dear diary").unwrap();

    let locker = Locker::new();
    locker.lock(&path, PASSWORD).unwrap();

    let destination = dir.path().join("entry.md.unlocked");
    fs::create_dir_all(destination.join("keep")).unwrap();
    fs::write(destination.join("keep").join("precious.md"), b"precious").unwrap();

    let result = locker.unlock(&path, &destination, PASSWORD);

    assert!(matches!(result, Err(DialogueError::AlreadyExists(_))));
    assert_eq!(
        fs::read(destination.join("keep").join("precious.md")).unwrap(),
        b"precious"
    );
}

#[cfg(unix)]
#[test]
fn test_lock_through_file_symlink_locks_target() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("real.md");
    let link = dir.path().join("link.md");
    fs::write(&target, b"secret plaintext").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let locker = Locker::new();
    locker.lock(&link, PASSWORD).expect("lock should succeed");

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    let on_disk = fs::read(&target).unwrap();
    assert_ne!(on_disk.as_slice(), b"secret plaintext");
    assert_eq!(decrypt(&on_disk, PASSWORD).unwrap(), b"secret plaintext");

    let destination = dir.path().join("link.md.unlocked");
    locker.unlock(&link, &destination, PASSWORD).unwrap();
    assert_eq!(fs::read(&destination).unwrap(), b"secret plaintext");
}

#[cfg(unix)]
#[test]
fn test_lock_through_directory_symlink_locks_target() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("journal");
    let link = dir.path().join("journal.locked");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("entry.md"), b"secret plaintext").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let locker = Locker::new();
    locker.lock(&link, PASSWORD).expect("lock should succeed");

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert!(target.is_file(), "target tree replaced by its container");

    let destination = dir.path().join("journal.unlocked");
    let outcome = locker.unlock(&link, &destination, PASSWORD).unwrap();
    assert_eq!(outcome, Unlocked::Directory);
    assert_eq!(
        fs::read(destination.join("entry.md")).unwrap(),
        b"secret plaintext"
    );
}
