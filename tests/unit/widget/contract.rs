use super::*;

#[derive(Debug, Default)]
struct Counter {
    n: i64,
    ticks: u32,
    unmounted: bool,
}

impl Visualization for Counter {
    fn key(&self) -> &'static str {
        "counter"
    }

    fn title(&self) -> &'static str {
        "Counter"
    }

    fn view(&self) -> serde_json::Value {
        serde_json::json!({ "n": self.n, "ticks": self.ticks })
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        match input {
            Interaction::Press { control } if control == "inc" => {
                self.n += 1;
                Ok(())
            }
            Interaction::Press { control } if control == "explode" => panic!("kaboom"),
            other => Err(other.unsupported("counter")),
        }
    }

    fn tick(&mut self, _elapsed: Duration) {
        self.ticks += 1;
    }

    fn unmount(&mut self) {
        self.unmounted = true;
    }
}

fn counter() -> Box<dyn Visualization> {
    Box::new(Counter::default())
}

fn broken() -> Box<dyn Visualization> {
    panic!("constructor failed")
}

#[test]
fn mount_builds_live_instance() {
    let m = MountedVisualization::mount("counter", 0, counter).unwrap();
    assert_eq!(m.state(), MountState::Live);
    assert_eq!(m.key(), "counter");
    assert_eq!(m.title(), Some("Counter"));
    assert_eq!(m.view(), Some(serde_json::json!({ "n": 0, "ticks": 0 })));
}

#[test]
fn panicking_factory_is_contained() {
    let err = MountedVisualization::mount("broken", 0, broken).unwrap_err();
    assert!(err.contains("constructor failed"));
}

#[test]
fn rejected_interaction_keeps_widget_live() {
    let mut m = MountedVisualization::mount("counter", 0, counter).unwrap();
    let err = m.dispatch(&Interaction::toggle("nope")).unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert_eq!(m.state(), MountState::Live);
    m.dispatch(&Interaction::press("inc")).unwrap();
    assert_eq!(m.view().unwrap()["n"], 1);
}

#[test]
fn panicking_handler_faults_only_this_instance() {
    let mut a = MountedVisualization::mount("counter", 0, counter).unwrap();
    let mut b = MountedVisualization::mount("counter", 1, counter).unwrap();

    assert!(a.dispatch(&Interaction::press("explode")).is_err());
    assert_eq!(a.state(), MountState::Faulted);
    assert_eq!(a.view(), None);
    assert!(a.dispatch(&Interaction::press("inc")).is_err());

    b.dispatch(&Interaction::press("inc")).unwrap();
    assert_eq!(b.view().unwrap()["n"], 1);
}

#[test]
fn unmounted_widget_ignores_ticks_and_rejects_input() {
    let mut m = MountedVisualization::mount("counter", 0, counter).unwrap();
    m.tick(Duration::from_millis(10));
    assert_eq!(m.view().unwrap()["ticks"], 1);

    m.unmount();
    assert_eq!(m.state(), MountState::Unmounted);
    m.tick(Duration::from_millis(10));
    assert_eq!(m.view(), None);
    let err = m.dispatch(&Interaction::press("inc")).unwrap_err();
    assert!(err.to_string().contains("unmounted"));
}

#[test]
fn interactions_deserialize_from_tagged_json() {
    let v: Interaction =
        serde_json::from_str(r#"{ "kind": "select", "control": "dir", "option": "row" }"#)
            .unwrap();
    assert_eq!(v, Interaction::select("dir", "row"));
    assert_eq!(v.control(), "dir");
}

#[derive(Debug)]
struct Glitchy {
    fails_in: &'static str,
}

impl Glitchy {
    fn check(&self, call: &str) {
        if self.fails_in == call {
            panic!("{call} blew up");
        }
    }
}

impl Visualization for Glitchy {
    fn key(&self) -> &'static str {
        "glitchy"
    }

    fn title(&self) -> &'static str {
        self.check("title");
        "Glitchy"
    }

    fn view(&self) -> serde_json::Value {
        self.check("view");
        serde_json::json!({})
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        Err(input.unsupported("glitchy"))
    }

    fn pending_transition(&self) -> Option<Duration> {
        self.check("pending_transition");
        Some(Duration::from_secs(1))
    }
}

fn glitchy_view() -> Box<dyn Visualization> {
    Box::new(Glitchy { fails_in: "view" })
}

fn glitchy_pending() -> Box<dyn Visualization> {
    Box::new(Glitchy {
        fails_in: "pending_transition",
    })
}

fn glitchy_title() -> Box<dyn Visualization> {
    Box::new(Glitchy { fails_in: "title" })
}

#[test]
fn panicking_view_faults_the_instance() {
    let mut m = MountedVisualization::mount("glitchy", 0, glitchy_view).unwrap();
    assert_eq!(m.pending_transition(), Some(Duration::from_secs(1)));
    assert_eq!(m.view(), None);
    assert_eq!(m.state(), MountState::Faulted);
    assert_eq!(m.pending_transition(), None);
    assert!(m.dispatch(&Interaction::press("any")).is_err());
}

#[test]
fn panicking_pending_transition_faults_the_instance() {
    let m = MountedVisualization::mount("glitchy", 0, glitchy_pending).unwrap();
    assert_eq!(m.pending_transition(), None);
    assert_eq!(m.state(), MountState::Faulted);
    assert_eq!(m.view(), None);
}

#[test]
fn panicking_title_faults_the_instance() {
    let m = MountedVisualization::mount("glitchy", 0, glitchy_title).unwrap();
    assert_eq!(m.title(), None);
    assert_eq!(m.state(), MountState::Faulted);
}
