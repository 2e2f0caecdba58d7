//! End-to-end: file-backed store, context switches, overlay and report.

use shortcuts::{
    BasicCommand, BindingOrigin, Command, ContextSwitcher, Overlay, SchemeResolver, Scope,
    ShortcutsConfig, Source, SwitchEvent, report,
};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

type Host = Rc<RefCell<Vec<Rc<dyn Command>>>>;
type Active = Rc<RefCell<Option<String>>>;

struct Session {
    line: Rc<BasicCommand>,
    save: Rc<BasicCommand>,
    active: Active,
    switcher: ContextSwitcher<Host, Box<dyn Fn() -> Option<String>>>,
}

fn session(store_path: &Path) -> Session {
    let line = Rc::new(BasicCommand::new("Sketch_Line", "&Line"));
    let save = Rc::new(BasicCommand::new("Std_Save", "&Save").with_shortcut("Ctrl+S"));
    let host: Host = Rc::new(RefCell::new(vec![
        line.clone() as Rc<dyn Command>,
        save.clone() as Rc<dyn Command>,
    ]));

    let config = ShortcutsConfig {
        store_path: Some(store_path.to_path_buf()),
        ..ShortcutsConfig::default()
    };
    let store = config.open_store().expect("open store");
    let active: Active = Rc::new(RefCell::new(None));
    let probe = active.clone();
    let contexts: Box<dyn Fn() -> Option<String>> = Box::new(move || probe.borrow().clone());

    let mut switcher = ContextSwitcher::new(SchemeResolver::new(host, store), contexts);
    switcher.start().expect("start");
    Session {
        line,
        save,
        active,
        switcher,
    }
}

fn activate(s: &mut Session, context: &str) {
    *s.active.borrow_mut() = Some(context.to_string());
    s.switcher
        .handle(SwitchEvent::ContextActivated(context.to_string()))
        .expect("switch");
}

#[test]
fn local_bindings_follow_the_active_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut s = session(&dir.path().join("bindings.toml"));

    s.switcher
        .set_binding(&Scope::named("Sketch"), "Sketch_Line", "l")
        .expect("bind");
    s.switcher
        .set_binding(&Scope::Global, "Sketch_Line", "Shift+L")
        .expect("bind");

    activate(&mut s, "Sketch");
    assert_eq!(s.line.shortcut(), "L");
    assert_eq!(
        s.switcher.resolver().origin("Sketch_Line"),
        Some(BindingOrigin::LocalOverride)
    );

    activate(&mut s, "Part");
    assert_eq!(s.line.shortcut(), "Shift+L");
    assert_eq!(s.switcher.resolver().lookup("L"), None);
    assert_eq!(s.save.shortcut(), "Ctrl+S");
}

#[test]
fn bindings_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/bindings.toml");
    {
        let mut s = session(&path);
        s.switcher
            .set_binding(&Scope::named("Sketch"), "Std_Save", "ctrl+alt+s")
            .expect("bind");
    }

    let mut s = session(&path);
    activate(&mut s, "Sketch");
    assert_eq!(s.save.shortcut(), "Ctrl+Alt+S");
    assert_eq!(
        s.switcher.resolver().default_shortcut("Std_Save"),
        Some("Ctrl+S")
    );
}

#[test]
fn clearing_restores_native_shortcut() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut s = session(&dir.path().join("bindings.toml"));
    activate(&mut s, "Sketch");

    let sketch = Scope::named("Sketch");
    let outcome = s
        .switcher
        .set_binding(&sketch, "Std_Save", "Ctrl+F2")
        .expect("bind");
    assert!(outcome.resolved);
    assert_eq!(s.save.shortcut(), "Ctrl+F2");

    let outcome = s.switcher.set_binding(&sketch, "Std_Save", "").expect("clear");
    assert_eq!(outcome.shortcut, "");
    assert_eq!(outcome.display, "Ctrl+S");
    assert_eq!(outcome.origin, Some(BindingOrigin::Native));
    assert_eq!(s.save.shortcut(), "Ctrl+S");
    assert!(!s.switcher.resolver().store().has_namespace(Source::User, &sketch));
}

#[test]
fn incomplete_slots_in_file_are_collected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bindings.toml");
    std::fs::write(
        &path,
        r#"
[User.Sketch]
index = "1,2"

[User.Sketch.1]
command = "Sketch_Line"
shortcut = ""

[User.Sketch.2]
command = "Std_Save"
shortcut = "F5"
"#,
    )
    .expect("seed store");

    let mut s = session(&path);
    activate(&mut s, "Sketch");
    assert_eq!(s.line.shortcut(), "");
    assert_eq!(s.save.shortcut(), "F5");

    let store = s.switcher.resolver().store();
    assert_eq!(store.index(Source::User, &Scope::named("Sketch")), vec!["2"]);
    let content = std::fs::read_to_string(&path).expect("read store");
    assert!(!content.contains("Sketch_Line"));
}

#[test]
fn overlay_and_report_see_the_active_scheme() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut s = session(&dir.path().join("bindings.toml"));
    s.switcher
        .set_binding(&Scope::named("Sketch"), "Sketch_Line", "L")
        .expect("bind");
    activate(&mut s, "Sketch");

    let overlay = Overlay::default();
    let completions = overlay.completions(s.switcher.resolver());
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].text, "L  Line");

    assert_eq!(
        overlay.trigger(s.switcher.resolver(), "l").as_deref(),
        Some("Sketch_Line")
    );
    assert_eq!(s.line.trigger_count(), 1);

    let lines = report(s.switcher.resolver().registry());
    assert_eq!(lines, vec!["Line\tL", "Save\tCtrl+S"]);
}
