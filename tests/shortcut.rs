extern crate locus;

use locus::errors::Error;
use locus::loader::ShortcutResolver;

#[test]
fn basic() {
    let mut shortcuts = ShortcutResolver::new();

    shortcuts.add("home:", "file://docs/").unwrap();
    shortcuts.add("a:", "home:").unwrap();
    shortcuts.add("b:", "a:locus/").unwrap();

    assert!(shortcuts.has("home:"));
    assert!(shortcuts.has("a:"));
    assert!(shortcuts.has("b:"));
    assert!(!shortcuts.has("abc:"));

    assert_eq!(shortcuts.resolve("home:").unwrap(), "file://docs/");
    assert_eq!(shortcuts.resolve("b:").unwrap(), "file://docs/locus/");
    assert_eq!(
        shortcuts.resolve("b:mock.txt").unwrap(),
        "file://docs/locus/mock.txt"
    );

    shortcuts.add("home:", "http://www.rust-lang.org/").unwrap();
    assert_eq!(
        shortcuts.resolve("b:").unwrap(),
        "http://www.rust-lang.org/locus/"
    );
}

#[test]
fn unregistered() {
    let mut shortcuts = ShortcutResolver::new();
    shortcuts.add("res:", "classpath:assets/").unwrap();

    assert_eq!(
        shortcuts.resolve("res:mock.txt").unwrap(),
        "classpath:assets/mock.txt"
    );
    assert_eq!(shortcuts.resolve("abc:mock.txt").unwrap(), "abc:mock.txt");
    assert_eq!(shortcuts.resolve("mock.txt").unwrap(), "mock.txt");
    assert_eq!(
        shortcuts.resolve("https://res:8080/").unwrap(),
        "https://res:8080/"
    );
}

#[test]
fn err() {
    let mut shortcuts = ShortcutResolver::new();

    // Shortcut MUST ends with a colon (':').
    match shortcuts.add("home", "file://docs/") {
        Err(Error::InvalidShortcut(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    // Shortcut MUST be at least 2 chars to not be confused with DOS drive letters.
    assert!(shortcuts.add(":", "file://docs/").is_err());
    assert!(shortcuts.add("c:", "file://docs/").is_ok());

    // Fullname must end in a '/' (dir) or ':' (other shortcut).
    assert!(shortcuts.add("home:", "file://docs").is_err());
    assert!(!shortcuts.has("home:"));
}
