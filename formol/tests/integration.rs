//! Integration tests for formol

use std::sync::{Arc, Mutex};

use example_forms::{
    MAX_SALARY, basic_text, basic_text_item, job_application, number2_greater, numbers,
    numbers_item, user_profile, user_profile_item,
};
use formol::{
    FieldDeclaration, FieldPath, FieldProps, FieldRegistry, FieldRenderer, FieldStatus,
    FocusTarget, Form, FormDefinition, FormOptions, ItemValue, KeyEvent, KeyOutcome,
    SubmissionState, SubmitOutcome, SubmitStart, TestHost, Violation,
};
use serde_json::json;
use tracing_test::traced_test;

type Calls = Arc<Mutex<Vec<(ItemValue, ItemValue, Vec<FieldPath>)>>>;

/// A handler that records its arguments and replies with `reply`.
fn recording(
    reply: serde_json::Value,
) -> (
    Calls,
    impl FnMut(&ItemValue, &ItemValue, &[FieldPath]) -> anyhow::Result<ItemValue> + Send + 'static,
) {
    let calls: Calls = Arc::default();
    let sink = Arc::clone(&calls);
    let handler = move |item: &ItemValue,
                        original: &ItemValue,
                        changed: &[FieldPath]|
          -> anyhow::Result<ItemValue> {
        sink.lock()
            .unwrap()
            .push((item.clone(), original.clone(), changed.to_vec()));
        Ok(ItemValue::from(reply.clone()))
    };
    (calls, handler)
}

fn text_form() -> Form {
    Form::new(basic_text())
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Ok(ItemValue::Null))
}

fn path(raw: &str) -> FieldPath {
    FieldPath::new(raw)
}

#[test]
fn test_dirty_goes_back_to_clean() {
    let mut form = text_form();
    assert_eq!(form.state(), SubmissionState::Clean);
    assert!(!form.controls().submit_enabled);
    assert!(!form.controls().cancel_enabled);

    form.on_change("text", "bar");
    assert!(form.is_dirty());
    assert!(form.controls().submit_enabled);
    assert!(form.controls().cancel_enabled);
    assert_eq!(form.changed_paths(), &[path("text")]);

    form.on_change("text", "foo");
    assert!(!form.is_dirty());
    assert_eq!(form.state(), SubmissionState::Clean);
    assert!(!form.controls().submit_enabled);
    assert!(!form.controls().cancel_enabled);
}

#[test]
fn test_cancel_twice() {
    let mut form = text_form();

    form.on_change("text", "bar");
    assert!(form.cancel());
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("foo")));
    assert!(!form.is_dirty());

    form.on_change("text", "baz");
    assert!(form.is_dirty());
    assert!(form.cancel());
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("foo")));
    assert!(!form.is_dirty());
    assert!(form.errors().is_empty());
}

#[test]
fn test_cancel_back_to_back() {
    let definition = FormDefinition::new(vec![FieldDeclaration::new("Text").required()]);
    let mut form = Form::new(definition)
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Ok(ItemValue::Null));

    form.on_change("text", "");
    assert!(form.error(&path("text")).is_some());

    assert!(form.cancel());
    let item = form.item().clone();
    let errors = form.errors();
    let state = form.state();
    let controls = form.controls();
    let view = form.render();

    assert!(form.cancel());
    assert_eq!(form.item(), &item);
    assert_eq!(form.errors(), errors);
    assert!(errors.is_empty());
    assert_eq!(form.state(), state);
    assert_eq!(state, SubmissionState::Clean);
    assert_eq!(form.controls(), controls);
    assert_eq!(form.render(), view);
}

#[test]
fn test_native_error_precedes_custom() {
    let definition = FormDefinition::new(vec![
        FieldDeclaration::new("Text")
            .required()
            .validate(|_, _| Err("Custom error".to_string())),
    ]);
    let mut form = Form::new(definition).with_item(basic_text_item());

    form.on_change("text", "");
    assert_eq!(form.error(&path("text")), Some("Please fill out this field."));
    assert_eq!(form.status(&path("text")), FieldStatus::Invalid);

    form.on_change("text", "x");
    assert_eq!(form.error(&path("text")), Some("Custom error"));
    assert!(!form.controls().submit_enabled);
    assert!(form.controls().cancel_enabled);
}

#[test]
fn test_server_error_lifecycle() {
    let definition = FormDefinition::new(vec![
        FieldDeclaration::new("Text"),
        FieldDeclaration::new("Other"),
    ]);
    let (calls, handler) = recording(json!({
        "text": "Server side error",
        "other": "Also wrong",
    }));
    let mut form = Form::new(definition)
        .with_item(ItemValue::from(json!({"text": "foo", "other": "bar"})))
        .on_submit(handler);
    let mut host = TestHost::new();

    form.on_change("text", "changed");
    form.on_change("other", "changed too");
    let outcome = form.submit(&mut host).unwrap();
    let SubmitOutcome::ServerRejected(applied) = outcome else {
        panic!("expected server errors, got {outcome:?}");
    };
    assert_eq!(applied.len(), 2);
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(form.error(&path("text")), Some("Server side error"));
    assert_eq!(form.error(&path("other")), Some("Also wrong"));
    assert_eq!(form.state(), SubmissionState::ServerRejected);
    assert!(form.controls().submit_enabled);

    // Standing server errors block the next intent without calling the handler.
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Blocked);
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(host.last_focused(), Some(&path("text")));

    form.on_change("text", "fixed");
    assert_eq!(form.error(&path("text")), None);
    assert_eq!(form.error(&path("other")), Some("Also wrong"));
    assert_eq!(form.state(), SubmissionState::ServerRejected);

    form.on_change("other", "fixed too");
    assert_eq!(form.state(), SubmissionState::Dirty);
    assert!(form.errors().is_empty());
}

#[test]
fn test_server_errors_for_undeclared_paths_are_dropped() {
    let mut form = Form::new(basic_text())
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Ok(ItemValue::from(json!({"nowhere": "Lost"}))));

    form.on_change("text", "bar");
    let outcome = form.submit(&mut TestHost::new()).unwrap();
    assert_eq!(outcome, SubmitOutcome::ServerRejected(Default::default()));
    assert!(form.errors().is_empty());
    assert_eq!(form.state(), SubmissionState::Dirty);
}

#[test]
fn test_blank_form_resets_after_save() {
    let (calls, handler) = recording(json!(false));
    let mut form = Form::new(basic_text()).on_submit(handler);
    assert!(!form.has_item());
    assert!(!form.controls().submit_enabled);

    form.on_change("text", "new entry");
    assert!(form.controls().submit_enabled);

    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);
    let calls = calls.lock().unwrap();
    let (item, original, changed) = &calls[0];
    assert_eq!(item.to_json(), json!({"text": "new entry"}));
    assert_eq!(original, &ItemValue::empty_map());
    assert_eq!(changed, &vec![path("text")]);

    assert_eq!(form.item(), &ItemValue::empty_map());
    assert_eq!(form.state(), SubmissionState::Clean);
    assert!(!form.controls().submit_enabled);
}

#[test]
fn test_saved_item_becomes_the_original() {
    let mut form = text_form();

    form.on_change("text", "bar");
    assert!(form.submit(&mut TestHost::new()).unwrap().is_saved());
    assert_eq!(form.original().to_json(), json!({"text": "bar"}));
    assert!(!form.is_dirty());

    form.on_change("text", "foo");
    assert!(form.is_dirty());
}

#[test]
fn test_nested_path_is_created() {
    let mut form = Form::new(user_profile()).with_item(user_profile_item());
    let original = form.original().clone();

    form.on_change("properties.extra.1.more.again.0.hereweare", "12");

    assert_eq!(
        form.item().to_json()["properties"]["extra"],
        json!([null, {"more": {"again": [{"hereweare": 12}]}}])
    );
    assert_eq!(form.original(), &original);
    assert_eq!(original.to_json()["properties"].get("extra"), None);
    assert_eq!(
        form.changed_paths(),
        &[path("properties.extra.1.more.again.0.hereweare")]
    );

    // Untouched branches are shared with the original.
    let addresses = path("addresses");
    assert!(
        formol::resolve::get(form.item(), &addresses)
            .unwrap()
            .same_node(formol::resolve::get(&original, &addresses).unwrap())
    );
}

#[test]
fn test_numbers_whole_form_validator() {
    let (calls, handler) = recording(json!(null));
    let mut form = Form::new(numbers())
        .with_item(numbers_item())
        .with_validator(number2_greater)
        .on_submit(handler);

    form.on_change("number2", 21);
    assert_eq!(
        form.error(&path("number2")),
        Some("Must be greater than number 1")
    );
    assert!(!form.controls().submit_enabled);

    let mut host = TestHost::new();
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Blocked);
    assert!(host.reported().is_empty());
    assert_eq!(host.last_focused(), Some(&path("number2")));
    assert!(calls.lock().unwrap().is_empty());

    form.on_change("number2", 43);
    assert_eq!(form.error(&path("number2")), None);
    assert!(form.controls().submit_enabled);
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Saved);
    assert_eq!(calls.lock().unwrap()[0].0.to_json(), json!({"number1": 42, "number2": 43}));
}

#[test]
#[traced_test]
fn test_malformed_reply_is_logged_and_accepted() {
    let mut form = Form::new(basic_text())
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Ok(ItemValue::from(json!({"badValue": 12}))));

    form.on_change("text", "bar");
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);
    assert!(logs_contain("onSubmit return value must be a mapping"));
    assert!(form.errors().is_empty());
    assert!(!form.is_dirty());
}

#[test]
#[traced_test]
fn test_handler_failure() {
    let mut form = Form::new(basic_text())
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Err(anyhow::anyhow!("network down")));

    form.on_change("text", "bar");
    let err = form.submit(&mut TestHost::new()).unwrap_err();
    assert!(err.is_rejected());
    assert!(logs_contain("submit handler failed"));
    assert_eq!(form.state(), SubmissionState::Dirty);
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("bar")));
}

#[test]
fn test_no_handler_ignores_submit() {
    let mut form = Form::new(basic_text()).with_item(basic_text_item());
    assert!(!form.controls().visible);
    form.on_change("text", "bar");
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Ignored);

    let form = Form::new(basic_text()).with_external_submit();
    assert!(form.controls().visible);
}

#[test]
fn test_read_only_toggle() {
    let mut form = text_form();
    form.set_read_only(true);

    form.on_change("text", "bar");
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("foo")));
    assert!(!form.is_dirty());

    let view = form.render();
    assert!(view.fields[0].widget.read_only());
    assert!(!view.controls.submit_enabled);
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Ignored);

    form.set_read_only(false);
    form.on_change("text", "bar");
    assert!(form.is_dirty());

    form.set_read_only(true);
    assert!(!form.cancel());
    assert!(!form.controls().cancel_enabled);
    assert!(form.is_dirty());
}

#[test]
fn test_read_only_keeps_errors() {
    let definition = FormDefinition::new(vec![FieldDeclaration::new("Text").required()]);
    let mut form = Form::new(definition)
        .with_item(basic_text_item())
        .on_submit(|_, _, _| Ok(ItemValue::Null));

    form.on_change("text", "");
    let errors = form.errors();
    assert_eq!(errors.get(&path("text")), Some("Please fill out this field."));

    form.set_read_only(true);
    assert_eq!(form.errors(), errors);
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("")));
    assert_eq!(
        form.render().fields[0].widget.error.as_deref(),
        Some("Please fill out this field.")
    );

    form.set_read_only(false);
    assert_eq!(form.errors(), errors);
    assert_eq!(form.status(&path("text")), FieldStatus::Invalid);
    assert!(form.is_dirty());
}

#[test]
fn test_disabled_form() {
    let mut form = text_form().with_options(FormOptions::new().with_disabled(true));
    form.on_change("text", "bar");
    assert!(!form.is_dirty());
    assert!(form.render().fields[0].widget.disabled());
}

#[test]
fn test_item_replacement_resets_everything() {
    let mut form = text_form();
    form.on_change("text", "");
    form.on_focus("text");

    form.set_item(ItemValue::from_pairs([("text", "replaced")]));
    assert_eq!(form.value(&path("text")), Some(&ItemValue::from("replaced")));
    assert_eq!(form.state(), SubmissionState::Clean);
    assert!(form.errors().is_empty());
    assert_eq!(form.status(&path("text")), FieldStatus::Pristine);
}

struct Stars;

impl FieldRenderer for Stars {
    fn input(&self) -> &str {
        "stars"
    }

    fn validity(&self, value: Option<&ItemValue>, _: &FieldProps) -> Result<(), Violation> {
        match value.and_then(ItemValue::as_int) {
            Some(1..=5) | None => Ok(()),
            Some(_) => Err(Violation::Custom("One to five stars".into())),
        }
    }
}

#[test]
fn test_registry_swap_resets_only_retyped_fields() {
    let definition = FormDefinition::new(vec![
        FieldDeclaration::new("Title"),
        FieldDeclaration::new("Rating").kind("number"),
    ]);
    let mut form = Form::new(definition)
        .with_item(ItemValue::from(json!({"title": "Dune", "rating": 4})));

    form.on_focus("title");
    form.on_change("title", "Dune Messiah");
    form.on_focus("rating");
    form.on_change("rating", 5);
    assert_eq!(form.status(&path("title")), FieldStatus::Valid);
    assert_eq!(form.status(&path("rating")), FieldStatus::Valid);

    form.set_registry(FieldRegistry::empty().with("number", Stars));
    assert_eq!(form.status(&path("title")), FieldStatus::Valid);
    assert_eq!(form.status(&path("rating")), FieldStatus::Pristine);
    assert_eq!(form.value(&path("rating")), Some(&ItemValue::Int(5)));
    assert!(form.is_path_dirty(&path("rating")));
    assert_eq!(form.render().fields[1].widget.input, "stars");

    form.on_change("rating", 7);
    assert_eq!(form.error(&path("rating")), Some("One to five stars"));
}

#[test]
fn test_locale_switch() {
    let definition = FormDefinition::new(vec![FieldDeclaration::new("Text").required()]);
    let mut form = Form::new(definition)
        .with_item(basic_text_item())
        .with_options(FormOptions::new().with_locale("fr-CA"))
        .on_submit(|_, _, _| Ok(ItemValue::Null));

    assert_eq!(form.controls().submit_label, "Envoyer");
    assert_eq!(form.controls().cancel_label, "Annuler");

    form.on_change("text", "");
    assert_eq!(form.error(&path("text")), Some("Veuillez renseigner ce champ."));

    form.set_locale("en");
    assert_eq!(form.error(&path("text")), Some("Please fill out this field."));
    assert_eq!(form.controls().submit_label, "Submit");
}

#[test]
fn test_options_from_json() {
    let options = FormOptions::from_json_str(r#"{"readOnly": true, "locale": "fr"}"#).unwrap();
    let form = Form::new(basic_text()).with_options(options);
    assert!(form.read_only());
    assert!(!form.disabled());
    assert_eq!(form.labels().language, "fr");
}

#[test]
fn test_enter_moves_to_next_field() {
    let mut form = Form::new(job_application())
        .with_options(FormOptions::new().with_focus_next_on_enter(true));
    let mut host = TestHost::new();

    assert_eq!(
        form.on_key_down("fullName", KeyEvent::enter(), &mut host),
        KeyOutcome::FocusNext(FocusTarget::Field(path("position")))
    );
    assert_eq!(host.last_focused(), Some(&path("position")));

    assert!(
        form.on_key_down("fullName", KeyEvent::enter().with_shift(), &mut host)
            .is_pass_through()
    );
    assert!(
        form.on_key_down("coverLetter", KeyEvent::enter(), &mut host)
            .is_pass_through()
    );
    assert_eq!(
        form.on_key_down("coverLetter", KeyEvent::enter().with_ctrl(), &mut host),
        KeyOutcome::FocusNext(FocusTarget::Field(path("portfolio")))
    );
    assert_eq!(
        form.on_key_down("terms", KeyEvent::enter(), &mut host),
        KeyOutcome::FocusNext(FocusTarget::Submit)
    );

    form.set_disabled(true);
    assert!(
        form.on_key_down("fullName", KeyEvent::enter(), &mut host)
            .is_pass_through()
    );
}

#[test]
fn test_enter_skips_disabled_fields() {
    let definition = FormDefinition::new(vec![
        FieldDeclaration::new("First"),
        FieldDeclaration::new("Second").disabled(),
        FieldDeclaration::new("Third"),
    ]);
    let mut form =
        Form::new(definition).with_options(FormOptions::new().with_focus_next_on_enter(true));

    assert_eq!(
        form.on_key_down("first", KeyEvent::enter(), &mut ()),
        KeyOutcome::FocusNext(FocusTarget::Field(path("third")))
    );

    form.set_focus_next_on_enter(false);
    assert!(
        form.on_key_down("first", KeyEvent::enter(), &mut ())
            .is_pass_through()
    );
}

#[test]
fn test_fast_field_commits_on_blur() {
    let mut form = Form::new(job_application());
    let letter = path("coverLetter");

    form.on_focus("coverLetter");
    form.on_change("coverLetter", "<p>Dear team</p>");
    assert_eq!(form.draft(&letter), Some(&ItemValue::from("<p>Dear team</p>")));
    assert_eq!(form.value(&letter), Some(&ItemValue::from("<p>Dear team</p>")));
    assert_eq!(formol::resolve::get(form.item(), &letter), None);
    assert!(!form.is_dirty());

    form.on_blur("coverLetter");
    assert_eq!(form.draft(&letter), None);
    assert_eq!(
        formol::resolve::get(form.item(), &letter),
        Some(&ItemValue::from("<p>Dear team</p>"))
    );
    assert!(form.is_path_dirty(&letter));
    assert_eq!(form.focused(), None);
}

#[test]
fn test_fast_field_draft_is_submitted() {
    let definition = FormDefinition::new(vec![FieldDeclaration::new("Notes").kind("area").fast()]);
    let (calls, handler) = recording(json!(null));
    let mut form = Form::new(definition)
        .with_item(ItemValue::from_pairs([("notes", "")]))
        .on_submit(handler);

    form.on_change("notes", "typed, never blurred");
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);
    assert_eq!(
        calls.lock().unwrap()[0].0.to_json(),
        json!({"notes": "typed, never blurred"})
    );
}

#[test]
fn test_job_application_submission() {
    let (calls, handler) = recording(json!(null));
    let mut form = Form::new(job_application()).on_submit(handler);

    form.on_change("terms", "on");
    form.on_change("fullName", "Ada Lovelace");
    form.on_change("position", "Engineer");
    form.toggle_choice("skills", "Rust", true).unwrap();
    form.toggle_choice("skills", "SQL", true).unwrap();
    form.toggle_choice("skills", "Rust", false).unwrap();
    form.on_change("salary", "52000");
    assert!(form.toggle_choice("nickname", "x", true).unwrap_err().is_unknown_field());

    assert_eq!(
        form.changed_paths(),
        &[
            path("fullName"),
            path("position"),
            path("skills"),
            path("salary"),
            path("terms")
        ]
    );
    assert!(form.controls().submit_enabled);
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);

    let calls = calls.lock().unwrap();
    let (item, _, changed) = &calls[0];
    assert_eq!(
        item.to_json(),
        json!({
            "fullName": "Ada Lovelace",
            "position": "Engineer",
            "skills": ["SQL"],
            "salary": 52000,
            "terms": true,
        })
    );
    assert_eq!(changed.len(), 5);
}

#[test]
fn test_job_application_field_checks() {
    let mut form = Form::new(job_application());

    form.on_change("salary", MAX_SALARY + 1.0);
    assert_eq!(
        form.error(&path("salary")),
        Some("Value must be less than or equal to 250000.")
    );

    form.on_change("position", "Astronaut");
    assert_eq!(
        form.error(&path("position")),
        Some("Please select one of the available options.")
    );

    form.on_change("graduation", "2024-06-30");
    form.on_change("startDate", "2024-01-15");
    assert_eq!(
        form.error(&path("startDate")),
        Some("Start date must be after graduation")
    );
    form.on_change("startDate", "2024-09-01");
    assert_eq!(form.error(&path("startDate")), None);

    form.on_change("portfolio", "not a url");
    assert!(form.error(&path("portfolio")).is_some());
}

#[test]
fn test_native_failures_are_reported() {
    let mut form = Form::new(user_profile()).on_submit(|_, _, _| Ok(ItemValue::Null));
    form.on_change("properties.email", "not-an-email");

    let mut host = TestHost::new();
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Blocked);
    assert_eq!(
        host.reported(),
        &[vec![
            path("properties.name"),
            path("properties.email"),
            path("addresses.0.city")
        ]]
    );
    assert_eq!(host.submit_clicks(), 0);
    assert_eq!(host.last_focused(), Some(&path("properties.name")));
    assert_eq!(form.state(), SubmissionState::Dirty);
}

#[test]
fn test_native_failures_fall_back_to_click() {
    let mut form = Form::new(user_profile()).on_submit(|_, _, _| Ok(ItemValue::Null));
    form.on_change("properties.email", "not-an-email");

    let mut host = TestHost::without_report_validity();
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Blocked);
    assert!(host.reported().is_empty());
    assert_eq!(host.submit_clicks(), 1);
}

#[test]
fn test_profile_edit_saves() {
    let (calls, handler) = recording(json!({}));
    let mut form = Form::new(user_profile())
        .with_item(user_profile_item())
        .on_submit(handler);

    form.on_change("addresses.0.city", "Marseille");
    form.on_change("newsletter", true);
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);

    let calls = calls.lock().unwrap();
    let (item, original, changed) = &calls[0];
    assert_eq!(item.to_json()["addresses"][0]["city"], json!("Marseille"));
    assert_eq!(item.to_json()["addresses"][1]["city"], json!("Paris"));
    assert_eq!(original.to_json()["addresses"][0]["city"], json!("Lyon"));
    assert_eq!(changed, &vec![path("addresses.0.city"), path("newsletter")]);
}

#[test]
fn test_late_server_error_for_edited_field_is_dropped() {
    let mut form = text_form();
    let mut host = TestHost::new();

    form.on_change("text", "bar");
    let SubmitStart::Started(pending) = form.begin_submit(&mut host) else {
        panic!("submission should start");
    };
    assert_eq!(form.state(), SubmissionState::Submitting);
    assert!(!form.controls().submit_enabled);
    assert!(matches!(form.begin_submit(&mut host), SubmitStart::Ignored));
    assert!(!form.cancel());

    form.on_change("text", "edited meanwhile");
    let outcome = form
        .complete_submit(pending, Ok(ItemValue::from(json!({"text": "Server side error"}))))
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::ServerRejected(Default::default()));
    assert_eq!(form.error(&path("text")), None);
    assert_eq!(form.state(), SubmissionState::Dirty);
}

#[test]
fn test_edits_after_snapshot_stay_dirty() {
    let mut form = text_form();

    form.on_change("text", "bar");
    let SubmitStart::Started(pending) = form.begin_submit(&mut ()) else {
        panic!("submission should start");
    };
    assert_eq!(pending.changed_paths(), &[path("text")]);
    form.on_change("text", "baz");

    assert!(form.complete_submit(pending, Ok(ItemValue::Null)).unwrap().is_saved());
    assert_eq!(form.original().to_json(), json!({"text": "bar"}));
    assert!(form.is_dirty());
}

#[test]
fn test_reply_after_item_replacement_is_dropped() {
    let mut form = text_form();

    form.on_change("text", "bar");
    let SubmitStart::Started(pending) = form.begin_submit(&mut ()) else {
        panic!("submission should start");
    };
    form.set_item(ItemValue::from_pairs([("text", "from elsewhere")]));

    let outcome = form
        .complete_submit(pending.clone(), Ok(ItemValue::from(json!({"text": "late"}))))
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Superseded);
    assert_eq!(form.original().to_json(), json!({"text": "from elsewhere"}));
    assert!(form.errors().is_empty());

    let err = form.complete_submit(pending, Ok(ItemValue::Null)).unwrap_err();
    assert!(!err.is_rejected());

    form.on_change("text", "again");
    let SubmitStart::Started(pending) = form.begin_submit(&mut ()) else {
        panic!("submission should start");
    };
    form.clear_item();
    let outcome = form.complete_submit(pending, Ok(ItemValue::Null)).unwrap();
    assert_eq!(outcome, SubmitOutcome::Superseded);
    assert!(!outcome.is_saved());
    assert_eq!(form.original(), &ItemValue::empty_map());
    assert_eq!(form.state(), SubmissionState::Clean);
}

#[test]
fn test_async_submit() {
    let mut form = text_form();
    form.on_change("text", "bar");

    let outcome = futures::executor::block_on(form.submit_async(
        &mut TestHost::new(),
        |item, original, changed| async move {
            assert_eq!(item.to_json(), json!({"text": "bar"}));
            assert_eq!(original.to_json(), json!({"text": "foo"}));
            assert_eq!(changed, vec![FieldPath::new("text")]);
            anyhow::Ok(ItemValue::from(json!({"text": "Taken"})))
        },
    ))
    .unwrap();

    assert!(matches!(outcome, SubmitOutcome::ServerRejected(ref errors) if errors.len() == 1));
    assert_eq!(form.error(&path("text")), Some("Taken"));
}

#[test]
fn test_native_submit_uses_the_same_pipeline() {
    let mut form = text_form();
    assert_eq!(form.native_submit(&mut ()).unwrap(), SubmitOutcome::Ignored);

    form.on_change("text", "bar");
    assert_eq!(form.native_submit(&mut ()).unwrap(), SubmitOutcome::Saved);
}

#[test]
fn test_field_status_lifecycle() {
    let definition = FormDefinition::new(vec![FieldDeclaration::new("Text").required()]);
    let mut form = Form::new(definition);
    let text = path("text");

    assert_eq!(form.status(&text), FieldStatus::Pristine);
    form.on_focus("text");
    assert_eq!(form.status(&text), FieldStatus::Touched);
    assert_eq!(form.focused(), Some(&text));

    form.on_blur("text");
    assert_eq!(form.status(&text), FieldStatus::Invalid);
    assert_eq!(form.error(&text), Some("Please fill out this field."));

    form.on_change("text", "ok");
    assert_eq!(form.status(&text), FieldStatus::Valid);
}

#[test]
fn test_render_and_context() {
    let mut form = text_form();
    form.on_focus("text");
    form.on_change("text", "bar");

    let (view, changed) = form.render_with_extra(|ctx| ctx.changed_paths().to_vec());
    assert_eq!(changed, vec![path("text")]);
    assert_eq!(view.fields.len(), 1);

    let field = &view.fields[0];
    assert_eq!(field.kind, "text");
    assert_eq!(field.widget.label, "Text");
    assert_eq!(field.widget.text, "bar");
    assert!(field.dirty);
    assert!(field.focused);
    assert_eq!(view.state, SubmissionState::Dirty);
    assert!(view.controls.visible);

    let ctx = form.context();
    assert_eq!(ctx.value(&path("text")), Some(&ItemValue::from("bar")));
    assert_eq!(ctx.original().to_json(), json!({"text": "foo"}));
    assert!(ctx.is_dirty());
}

#[test]
fn test_definition_change_unmounts_fields() {
    let mut form = Form::new(numbers())
        .with_item(numbers_item())
        .with_validator(number2_greater)
        .on_submit(|_, _, _| Ok(ItemValue::Null));
    form.on_change("number2", 1);
    assert!(form.error(&path("number2")).is_some());

    form.set_definition(FormDefinition::new(vec![
        FieldDeclaration::new("Number 1").kind("number"),
    ]));
    assert_eq!(form.error(&path("number2")), None);
    assert!(!form.is_dirty());
    assert_eq!(form.render().fields.len(), 1);

    // The validator still flags number2, but nothing shows it any more.
    form.on_change("number1", 50);
    assert!(form.errors().is_empty());
    assert!(form.controls().submit_enabled);

    let mut host = TestHost::new();
    assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Saved);
    assert!(host.focused().is_empty());
}

#[test]
fn test_form_errors_for_undeclared_paths_are_dropped() {
    let mut form = Form::new(basic_text())
        .with_item(basic_text_item())
        .with_validator(|_| formol::ErrorMap::new().with("hidden", "nope"))
        .on_submit(|_, _, _| Ok(ItemValue::Null));

    form.on_change("text", "bar");
    assert!(form.errors().is_empty());
    assert!(form.controls().submit_enabled);
    assert_eq!(form.submit(&mut TestHost::new()).unwrap(), SubmitOutcome::Saved);
}

#[test]
fn test_far_list_index_is_ignored() {
    let definition = FormDefinition::new(vec![
        FieldDeclaration::new("Entry").named("list.18446744073709551615"),
        FieldDeclaration::new("Other").named("list.99999999999"),
    ]);
    let mut form = Form::new(definition).with_item(ItemValue::from(json!({"list": ["a"]})));

    form.on_change("list.18446744073709551615", "v");
    form.on_change("list.99999999999", "w");
    assert_eq!(form.item().to_json(), json!({"list": ["a"]}));
    assert!(!form.is_dirty());
}
