//! Built-in viewer scenario suites.
//!
//! Each suite mounts fresh widgets under the run's shared document root and
//! walks the simulate → settle → assert protocol. The environment is shared
//! across a suite's cases, so cases reset the document root up front and
//! assert on bridge-call deltas rather than absolute counts.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use inkview_bridge::Message;
use inkview_dom::Event;
use inkview_widgets::{
    Attachment, AttachmentBar, DropdownMenu, ProgressRing, SaveController, ScriptingGate,
    UnloadGuard, ViewerToolbar,
};

use crate::case::TestCase;
use crate::check::{expect_blank, expect_eq, expect_false, expect_true, expect_unset};
use crate::env::ViewerEnv;
use crate::report::RunReport;
use crate::runner::{ResultSink, Runner};

/// A named group of scenario cases.
pub struct Suite {
    /// Suite name, unique across [`all`].
    pub name: &'static str,
    build: fn() -> Vec<TestCase>,
}

impl Suite {
    /// Instantiate this suite's cases.
    #[must_use]
    pub fn cases(&self) -> Vec<TestCase> {
        (self.build)()
    }

    /// Run this suite against a fresh environment.
    pub fn run(&self, sink: &mut dyn ResultSink) -> RunReport {
        Runner::new(ViewerEnv::new()).run(self.cases(), sink)
    }
}

/// All registered suites, in run order.
#[must_use]
pub fn all() -> Vec<Suite> {
    vec![
        Suite {
            name: "toolbar",
            build: toolbar_cases,
        },
        Suite {
            name: "attachments",
            build: attachment_cases,
        },
        Suite {
            name: "dropdown",
            build: dropdown_cases,
        },
        Suite {
            name: "progress",
            build: progress_cases,
        },
        Suite {
            name: "unload-guard",
            build: unload_guard_cases,
        },
        Suite {
            name: "save-flow",
            build: save_flow_cases,
        },
        Suite {
            name: "scripting-gate",
            build: scripting_gate_cases,
        },
    ]
}

/// Look up one suite by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Suite> {
    all().into_iter().find(|suite| suite.name == name)
}

fn toolbar_cases() -> Vec<TestCase> {
    vec![
        TestCase::sync("toolbar_title_blank_before_reflection", |cx| {
            cx.env().reset_document();
            let env = cx.env();
            let toolbar = ViewerToolbar::new(&env.scheduler, &env.bridge);
            env.root.append_child(toolbar.root());

            expect_blank(toolbar.title_text().as_deref())?;
            toolbar.set_doc_title("draft.pdf");
            // Still queued: the mutation must not be observable yet.
            expect_blank(toolbar.title_text().as_deref())?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("toolbar_title_reflects_after_settle", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let toolbar = ViewerToolbar::new(&env.scheduler, &env.bridge);
            env.root.append_child(toolbar.root());

            toolbar.set_doc_title("quarterly-report.pdf");
            toolbar.set_page_count(12);
            cx.settle().await;

            expect_eq(Some("quarterly-report.pdf".to_owned()), toolbar.title_text())?;
            expect_eq(
                Some("12".to_owned()),
                toolbar.root().attribute("data-page-count"),
            )?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("toolbar_annotation_mode_round_trip", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let toolbar = ViewerToolbar::new(&env.scheduler, &env.bridge);
            env.root.append_child(toolbar.root());
            let before = env.bridge.call_count("setAnnotationMode");

            toolbar.set_annotation_mode(true);
            expect_eq(before + 1, env.bridge.call_count("setAnnotationMode"))?;
            cx.settle().await;
            expect_true(toolbar.root().has_attribute("annotation-mode"))?;

            toolbar.set_annotation_mode(false);
            cx.settle().await;
            expect_false(toolbar.root().has_attribute("annotation-mode"))?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn attachment_cases() -> Vec<TestCase> {
    fn sample_files() -> Vec<Attachment> {
        vec![
            Attachment {
                name: "notes.txt".into(),
                size: 120,
            },
            Attachment {
                name: "chart.png".into(),
                size: 48_000,
            },
        ]
    }

    vec![
        TestCase::new("attachment_list_populates_after_settle", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let bar = AttachmentBar::new(&env.scheduler, &env.bridge);
            env.root.append_child(bar.root());

            bar.set_attachments(sample_files());
            expect_eq(0, bar.root().child_count())?;
            cx.settle().await;
            expect_eq(2, bar.root().child_count())?;
            expect_eq(
                Some("chart.png".to_owned()),
                env.root
                    .descendant_by_id("item-1")
                    .and_then(|el| el.attribute("name")),
            )?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("attachment_activation_requests_save", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let bar = AttachmentBar::new(&env.scheduler, &env.bridge);
            env.root.append_child(bar.root());
            let before = env.bridge.call_count("saveAttachment");

            let requested = Rc::new(Cell::new(0));
            let count = Rc::clone(&requested);
            bar.events()
                .add_listener("save-requested", move |_| count.set(count.get() + 1));

            bar.set_attachments(sample_files());
            cx.settle().await;

            expect_true(bar.activate(0))?;
            expect_eq(before + 1, env.bridge.call_count("saveAttachment"))?;
            expect_eq(1, requested.get())?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn dropdown_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("dropdown_open_attribute_tracks_state", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let menu = DropdownMenu::new(&env.scheduler, "downloads");
            env.root.append_child(menu.root());

            expect_unset(menu.root().attribute("open"))?;
            menu.open();
            expect_unset(menu.root().attribute("open"))?;
            cx.settle().await;
            expect_eq(Some(String::new()), menu.root().attribute("open"))?;

            menu.close();
            cx.settle().await;
            expect_unset(menu.root().attribute("open"))?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("dropdown_selection_closes_and_notifies", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let menu = DropdownMenu::new(&env.scheduler, "downloads");
            env.root.append_child(menu.root());

            let changes = Rc::new(Cell::new(0));
            let count = Rc::clone(&changes);
            menu.events()
                .add_listener("change", move |_| count.set(count.get() + 1));

            menu.open();
            menu.select("with-annotations");
            cx.settle().await;

            expect_eq(
                Some(json!("with-annotations")),
                menu.root().property("selected"),
            )?;
            expect_unset(menu.root().attribute("open"))?;
            expect_eq(1, changes.get())?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn progress_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("progress_display_is_deterministic", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let ring = ProgressRing::new(&env.scheduler);
            env.root.append_child(ring.root());

            ring.set_value(30.0);
            cx.settle().await;
            expect_eq(Some(json!("30%")), ring.root().property("display"))?;
            expect_eq(
                Some("30".to_owned()),
                ring.root().attribute("aria-valuenow"),
            )?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("progress_settle_is_idempotent", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let ring = ProgressRing::new(&env.scheduler);
            env.root.append_child(ring.root());

            ring.set_value(55.0);
            cx.settle().await;
            let first = ring.root().property("display");
            cx.settle().await;
            expect_eq(first, ring.root().property("display"))?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("progress_completion_fires_once", |cx| async move {
            cx.env().reset_document();
            let env = cx.env();
            let ring = ProgressRing::new(&env.scheduler);
            env.root.append_child(ring.root());

            let fired = Rc::new(Cell::new(0));
            let count = Rc::clone(&fired);
            ring.events()
                .add_listener("load-complete", move |_| count.set(count.get() + 1));

            ring.set_value(100.0);
            ring.set_value(100.0);
            cx.settle().await;
            expect_eq(1, fired.get())?;
            expect_true(ring.root().has_attribute("complete"))?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn unload_guard_cases() -> Vec<TestCase> {
    vec![
        TestCase::sync("unload_guard_blocks_with_unsaved_edit", |cx| {
            let env = cx.env();
            let guard = UnloadGuard::new(&env.bridge);
            let before = env.bridge.call_count("preventDefault");

            guard.mark_edited();
            let event = Event::named("beforeunload");
            guard.handle_before_unload(&event);

            expect_true(event.default_prevented())?;
            expect_eq(before + 1, env.bridge.call_count("preventDefault"))?;
            cx.pass();
            Ok(())
        }),
        TestCase::sync("unload_guard_releases_after_undo", |cx| {
            let env = cx.env();
            let guard = UnloadGuard::new(&env.bridge);
            let before = env.bridge.call_count("preventDefault");

            guard.mark_edited();
            guard.undo();
            let event = Event::named("beforeunload");
            guard.handle_before_unload(&event);

            expect_false(event.default_prevented())?;
            expect_eq(before, env.bridge.call_count("preventDefault"))?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn save_flow_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("save_round_trip_resolves_once", |cx| async move {
            let env = cx.env();
            let controller = SaveController::new(&env.bridge);

            let pending = controller.request_save("edited");
            // The plugin answers on a later microtask.
            let bridge = Rc::clone(&env.bridge);
            env.scheduler.schedule(move || {
                bridge.inject(&Message::new(
                    "save-done",
                    json!({"fileName": "annotated.pdf", "dataSize": 4096}),
                ));
            });

            let file = pending.await.map_err(|err| {
                crate::check::Failure::errored(format!("save rejected: {err}"))
            })?;
            expect_eq("annotated.pdf", file.file_name.as_str())?;
            expect_eq(4096, file.data_size)?;
            expect_false(controller.save_in_flight())?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("save_failure_rejects_the_handle", |cx| async move {
            let env = cx.env();
            let controller = SaveController::new(&env.bridge);

            let pending = controller.request_save("original");
            let bridge = Rc::clone(&env.bridge);
            env.scheduler.schedule(move || {
                bridge.inject(&Message::new("save-failed", json!({"reason": "disk full"})));
            });

            expect_true(pending.await.is_err())?;
            cx.pass();
            Ok(())
        }),
    ]
}

fn scripting_gate_cases() -> Vec<TestCase> {
    vec![
        TestCase::new("connect_without_token_is_denied_async", |cx| async move {
            let env = cx.env();
            let gate = ScriptingGate::new(&env.bridge, &env.scheduler);

            let denials = Rc::new(Cell::new(0));
            let count = Rc::clone(&denials);
            gate.events()
                .add_listener("connection-denied", move |_| count.set(count.get() + 1));

            env.bridge.inject(&Message::named("connect"));
            // The verdict must not have fired synchronously.
            expect_eq(0, denials.get())?;
            cx.settle().await;
            expect_eq(1, denials.get())?;
            cx.pass();
            Ok(())
        }),
        TestCase::new("connect_with_token_is_granted", |cx| async move {
            let env = cx.env();
            let gate = ScriptingGate::new(&env.bridge, &env.scheduler);
            gate.set_token(Some("viewer-token".into()));

            let granted = Rc::new(Cell::new(0));
            let count = Rc::clone(&granted);
            gate.events()
                .add_listener("connection-granted", move |_| count.set(count.get() + 1));

            env.bridge
                .inject(&Message::new("connect", json!({"token": "viewer-token"})));
            cx.settle().await;
            expect_eq(1, granted.get())?;
            cx.pass();
            Ok(())
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CollectSink;

    #[test]
    fn every_builtin_suite_passes() {
        for suite in all() {
            let report = suite.run(&mut CollectSink::new());
            assert!(
                report.all_passed(),
                "suite {} did not pass: {}",
                suite.name,
                report.summary()
            );
        }
    }

    #[test]
    fn suite_lookup_by_name() {
        assert!(by_name("progress").is_some());
        assert!(by_name("nonexistent").is_none());
    }

    #[test]
    fn suite_names_are_unique() {
        let mut names: Vec<&str> = all().iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
    }
}
