use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use formol_types::{
    ErrorMap, FieldDeclaration, FieldPath, FieldProps, FieldRenderer, FieldView, FormDefinition,
    FormError, FormHost, ItemValue, SubmitError, Widget, resolve,
};

use crate::context::FormContext;
use crate::dirty::DirtyTracker;
use crate::i18n::Labels;
use crate::keyboard::{FocusTarget, KeyEvent, KeyOutcome};
use crate::options::FormOptions;
use crate::registry::{self, DEFAULT_KIND, FieldRegistry};
use crate::renderers;
use crate::submission::{
    self, PendingSubmission, Phase, Reply, Submission, SubmissionState, SubmitHandler,
    SubmitOutcome, SubmitStart,
};
use crate::validation::{self, FieldFailure, FieldStatus, Validation};

/// Whole-form validator: `transient item -> path -> message`.
pub type FormValidator = Arc<dyn Fn(&ItemValue) -> ErrorMap + Send + Sync>;

/// State of the submit and cancel controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    /// Controls are only shown for forms that can be submitted.
    pub visible: bool,
    pub submit_enabled: bool,
    pub cancel_enabled: bool,
    pub submit_label: &'static str,
    pub cancel_label: &'static str,
}

/// One field, ready to be drawn by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    pub widget: Widget,
    /// Registry key the field was rendered with.
    pub kind: String,
    pub status: FieldStatus,
    pub dirty: bool,
    pub focused: bool,
}

/// Everything the host needs to draw a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub fields: Vec<RenderedField>,
    pub controls: Controls,
    pub state: SubmissionState,
}

/// The form controller.
///
/// A `Form` owns the original item and the transient copy being edited,
/// and processes one event at a time: focus, change, blur, key presses,
/// submit and cancel. Every change is written copy-on-write into the
/// transient item, then dirtiness and validation are recomputed before the
/// call returns.
pub struct Form {
    definition: FormDefinition,
    base: FieldRegistry,
    registry: FieldRegistry,
    options: FormOptions,
    labels: &'static Labels,
    original: ItemValue,
    transient: ItemValue,
    has_item: bool,
    generation: u64,
    dirty: DirtyTracker,
    validation: Validation,
    drafts: HashMap<FieldPath, ItemValue>,
    focused: Option<FieldPath>,
    mounted: HashMap<FieldPath, usize>,
    validator: Option<FormValidator>,
    handler: Option<SubmitHandler>,
    external_submit: bool,
    submission: Submission,
}

impl Form {
    /// Create a blank form over the given fields.
    pub fn new(definition: FormDefinition) -> Self {
        let base = FieldRegistry::new();
        let mut form = Self {
            definition,
            registry: base.clone(),
            base,
            options: FormOptions::default(),
            labels: Labels::for_locale("en"),
            original: ItemValue::empty_map(),
            transient: ItemValue::empty_map(),
            has_item: false,
            generation: 0,
            dirty: DirtyTracker::new(),
            validation: Validation::new(),
            drafts: HashMap::new(),
            focused: None,
            mounted: HashMap::new(),
            validator: None,
            handler: None,
            external_submit: false,
            submission: Submission::default(),
        };
        form.remount();
        form
    }

    /// Edit `item` instead of a blank one.
    pub fn with_item(mut self, item: impl Into<ItemValue>) -> Self {
        self.set_item(item);
        self
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.labels = Labels::for_locale(&options.locale);
        self.options = options;
        self
    }

    /// Merge `overrides` over the built-in renderers.
    pub fn with_registry(mut self, overrides: FieldRegistry) -> Self {
        self.set_registry(overrides);
        self
    }

    /// Set the whole-form validator.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&ItemValue) -> ErrorMap + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Set the submit handler.
    ///
    /// The handler receives the submitted item, the original item and the
    /// changed paths. It returns a falsy value on success or a mapping of
    /// server errors.
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&ItemValue, &ItemValue, &[FieldPath]) -> anyhow::Result<ItemValue> + Send + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Show the controls although no handler is set, for forms submitted
    /// through [`Form::begin_submit`] or [`Form::submit_async`].
    pub fn with_external_submit(mut self) -> Self {
        self.external_submit = true;
        self
    }

    // Props updates

    /// Replace the original item. The transient copy and all errors are
    /// rebuilt from it.
    pub fn set_item(&mut self, item: impl Into<ItemValue>) {
        self.generation += 1;
        self.has_item = true;
        self.reset_to(item.into());
        tracing::debug!(generation = self.generation, "item replaced");
    }

    /// Go back to editing a blank item.
    pub fn clear_item(&mut self) {
        self.generation += 1;
        self.has_item = false;
        self.reset_to(ItemValue::empty_map());
        tracing::debug!(generation = self.generation, "item cleared");
    }

    /// Replace the declared fields. Fields that disappear are unmounted.
    pub fn set_definition(&mut self, definition: FormDefinition) {
        self.definition = definition;
        let paths = self.definition.paths();
        self.drafts.retain(|path, _| paths.contains(path));
        self.remount();
        self.recompute_dirty();
    }

    /// Replace the caller's renderer overrides.
    ///
    /// Fields whose renderer changed start over as pristine; their values
    /// and errors are kept.
    pub fn set_registry(&mut self, overrides: FieldRegistry) {
        self.registry = self.base.clone().merged(&overrides);
        tracing::debug!(overrides = overrides.len(), "field registry swapped");
        self.remount();
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.options.locale = locale.into();
        self.labels = Labels::for_locale(&self.options.locale);
        // Native messages are localized: redo the fields that show one.
        for path in self.definition.paths() {
            if matches!(
                self.validation.status(&path),
                FieldStatus::Valid | FieldStatus::Invalid
            ) {
                self.validate_field(&path);
            }
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.options.read_only = read_only;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    pub fn set_focus_next_on_enter(&mut self, focus_next_on_enter: bool) {
        self.options.focus_next_on_enter = focus_next_on_enter;
    }

    // Field events

    pub fn on_focus(&mut self, path: impl Into<FieldPath>) {
        let path = path.into();
        self.validation.touch(&path);
        self.focused = Some(path);
    }

    /// A widget reports a new value.
    ///
    /// The value is normalized by the field's renderer and written at
    /// `path`. Fast fields keep it as a draft until blur. Changes are
    /// ignored on a read-only or disabled form or field.
    pub fn on_change(&mut self, path: impl Into<FieldPath>, value: impl Into<ItemValue>) {
        let path = path.into();
        let mut value = value.into();
        let mut fast = false;
        if let Some(field) = self.definition.field(&path) {
            let (renderer, props) = self.resolved(field);
            if self.is_locked() || props.read_only || props.disabled {
                tracing::debug!(%path, "change ignored on a locked field");
                return;
            }
            value = renderer.normalize(value);
            fast = props.fast;
        } else if self.is_locked() {
            return;
        }

        if fast {
            self.drafts.insert(path, value);
        } else {
            self.commit(path, value);
        }
    }

    pub fn on_blur(&mut self, path: impl Into<FieldPath>) {
        let path = path.into();
        if self.focused.as_ref() == Some(&path) {
            self.focused = None;
        }
        if let Some(draft) = self.drafts.remove(&path) {
            self.commit(path, draft);
            return;
        }
        if self.definition.field(&path).is_some() {
            self.validate_field(&path);
            self.validate_form();
        }
    }

    /// Check or uncheck `choice` in a multi-valued field.
    pub fn toggle_choice(
        &mut self,
        path: impl Into<FieldPath>,
        choice: impl Into<ItemValue>,
        checked: bool,
    ) -> Result<(), FormError> {
        let path = path.into();
        if self.definition.field(&path).is_none() {
            return Err(FormError::unknown_field(path));
        }
        let current = self.value(&path);
        let next = renderers::toggle_choice(current, &choice.into(), checked);
        self.on_change(path, next);
        Ok(())
    }

    /// Key-down in a field. With `focus_next_on_enter` set, an advancing
    /// Enter moves focus to the next enabled field (or the submit control
    /// after the last one).
    pub fn on_key_down<H: FormHost>(
        &mut self,
        path: impl Into<FieldPath>,
        event: KeyEvent,
        host: &mut H,
    ) -> KeyOutcome {
        if !self.options.focus_next_on_enter || self.options.disabled {
            return KeyOutcome::PassThrough;
        }
        let path = path.into();
        let Some(index) = self.definition.position(&path) else {
            return KeyOutcome::PassThrough;
        };
        let (renderer, _) = self.resolved(&self.definition.fields[index]);
        if !event.advances(renderer.multiline()) {
            return KeyOutcome::PassThrough;
        }

        let next = self.definition.fields[index + 1..]
            .iter()
            .filter(|field| !self.resolved(field).1.disabled)
            .map(FieldDeclaration::path)
            .find(|next| *next != path);
        match next {
            Some(next) => {
                host.focus_field(&next);
                KeyOutcome::FocusNext(FocusTarget::Field(next))
            }
            None => KeyOutcome::FocusNext(FocusTarget::Submit),
        }
    }

    // Submission

    /// First phase of a submit intent: validate everything and take a
    /// snapshot.
    ///
    /// Pending fast-field drafts are committed first. On a native
    /// constraint failure the host reports validity inline if it can, and
    /// gets its submit control clicked otherwise. On any failure the first
    /// errored field is focused.
    pub fn begin_submit<H: FormHost>(&mut self, host: &mut H) -> SubmitStart {
        if self.submission.is_busy() {
            tracing::debug!("submit intent ignored, a submission is in flight");
            return SubmitStart::Ignored;
        }
        if self.is_locked() {
            tracing::debug!("submit intent ignored on a locked form");
            return SubmitStart::Ignored;
        }
        let drafts: Vec<(FieldPath, ItemValue)> = self.drafts.drain().collect();
        for (path, value) in drafts {
            self.commit(path, value);
        }
        if !self.dirty.is_dirty() {
            tracing::debug!("submit intent ignored, nothing changed");
            return SubmitStart::Ignored;
        }

        self.submission.validating();
        let paths = self.definition.paths();
        let mut native = Vec::new();
        for path in &paths {
            if let Some(failure) = self.validate_field(path)
                && failure.is_native()
            {
                native.push(path.clone());
            }
        }
        self.validate_form();

        if !native.is_empty() {
            if host.supports_report_validity() {
                host.report_validity(&native);
            } else {
                host.click_submit();
            }
        }
        if self.validation.has_errors() {
            if let Some(first) = paths.iter().find(|p| self.validation.error(p).is_some()) {
                host.focus_field(first);
            }
            self.submission.idle();
            tracing::debug!("submit blocked by validation errors");
            return SubmitStart::Blocked;
        }

        let id = self.submission.start();
        let pending = PendingSubmission {
            id,
            item: self.transient.clone(),
            original: self.original.clone(),
            changed: self.dirty.changed().to_vec(),
            generation: self.generation,
            versions: self.validation.edit_versions(),
        };
        tracing::debug!(id, changed = pending.changed.len(), "submitting");
        SubmitStart::Started(pending)
    }

    /// Second phase: apply the handler's reply to a pending submission.
    ///
    /// Server errors for fields edited since [`Form::begin_submit`] are
    /// dropped. If the item was replaced in the meantime, the reply is
    /// dropped entirely and the outcome is [`SubmitOutcome::Superseded`].
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        reply: anyhow::Result<ItemValue>,
    ) -> Result<SubmitOutcome, SubmitError> {
        if !self.submission.finish(pending.id) {
            return Err(SubmitError::NotInFlight(pending.id));
        }
        let reply = match reply {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(id = pending.id, error = %err, "submit handler failed");
                return Err(SubmitError::Rejected(err));
            }
        };
        let reply = submission::interpret_reply(&reply).unwrap_or_else(|err| {
            tracing::error!("{err}");
            Reply::Accepted
        });

        if pending.generation != self.generation {
            tracing::debug!(id = pending.id, "item replaced during submission, reply dropped");
            return Ok(SubmitOutcome::Superseded);
        }

        match reply {
            Reply::Accepted => {
                self.accept(pending);
                Ok(SubmitOutcome::Saved)
            }
            Reply::Rejected(errors) => {
                let declared = self.definition.paths();
                let mut applied = ErrorMap::new();
                for (path, message) in errors {
                    if !declared.contains(&path) {
                        tracing::debug!(%path, "server error for an undeclared path dropped");
                    } else if self.validation.edit_version(&path) != pending.version(&path) {
                        tracing::debug!(%path, "server error dropped, field edited since submit");
                    } else {
                        self.validation.insert_server(path.clone(), message.clone());
                        applied.insert(path, message);
                    }
                }
                tracing::debug!(id = pending.id, errors = applied.len(), "submission rejected");
                Ok(SubmitOutcome::ServerRejected(applied))
            }
        }
    }

    fn accept(&mut self, pending: PendingSubmission) {
        self.validation.clear_server();
        if self.has_item {
            self.original = pending.item;
            self.recompute_dirty();
            tracing::debug!(id = pending.id, "submission saved, rebased on the submitted item");
        } else {
            self.reset_to(ItemValue::empty_map());
            tracing::debug!(id = pending.id, "submission saved, form reset to blank");
        }
    }

    /// Submit with the handler given to [`Form::on_submit`].
    pub fn submit<H: FormHost>(&mut self, host: &mut H) -> Result<SubmitOutcome, SubmitError> {
        if self.handler.is_none() {
            tracing::debug!("submit intent ignored, no handler");
            return Ok(SubmitOutcome::Ignored);
        }
        let pending = match self.begin_submit(host) {
            SubmitStart::Started(pending) => pending,
            SubmitStart::Ignored => return Ok(SubmitOutcome::Ignored),
            SubmitStart::Blocked => return Ok(SubmitOutcome::Blocked),
        };
        let reply = match self.handler.as_mut() {
            Some(handler) => handler(&pending.item, &pending.original, pending.changed.as_slice()),
            None => Ok(ItemValue::Null),
        };
        self.complete_submit(pending, reply)
    }

    /// An intercepted native form submission (e.g. Enter in the last
    /// field). Goes through the same pipeline as the submit control.
    pub fn native_submit<H: FormHost>(
        &mut self,
        host: &mut H,
    ) -> Result<SubmitOutcome, SubmitError> {
        tracing::debug!("native submission intercepted");
        self.submit(host)
    }

    /// Submit with an asynchronous handler.
    ///
    /// The handler gets owned copies of the submitted item, the original
    /// item and the changed paths (copies share structure with the form).
    pub async fn submit_async<H, F, Fut>(
        &mut self,
        host: &mut H,
        handler: F,
    ) -> Result<SubmitOutcome, SubmitError>
    where
        H: FormHost,
        F: FnOnce(ItemValue, ItemValue, Vec<FieldPath>) -> Fut,
        Fut: Future<Output = anyhow::Result<ItemValue>>,
    {
        let pending = match self.begin_submit(host) {
            SubmitStart::Started(pending) => pending,
            SubmitStart::Ignored => return Ok(SubmitOutcome::Ignored),
            SubmitStart::Blocked => return Ok(SubmitOutcome::Blocked),
        };
        let reply = handler(
            pending.item.clone(),
            pending.original.clone(),
            pending.changed.clone(),
        )
        .await;
        self.complete_submit(pending, reply)
    }

    /// Throw the edits away: back to a fresh copy of the original item,
    /// without errors. Ignored while read-only, disabled or submitting.
    pub fn cancel(&mut self) -> bool {
        if self.is_locked() || self.submission.is_busy() {
            tracing::debug!("cancel ignored");
            return false;
        }
        self.reset_to(self.original.clone());
        true
    }

    // Reads

    /// The transient item.
    pub fn item(&self) -> &ItemValue {
        &self.transient
    }

    pub fn original(&self) -> &ItemValue {
        &self.original
    }

    /// Whether the form was given an item (as opposed to a blank form).
    pub fn has_item(&self) -> bool {
        self.has_item
    }

    /// Value shown at `path`: the draft of a fast field, else the transient
    /// value.
    pub fn value(&self, path: &FieldPath) -> Option<&ItemValue> {
        self.drafts
            .get(path)
            .or_else(|| resolve::get(&self.transient, path))
    }

    pub fn draft(&self, path: &FieldPath) -> Option<&ItemValue> {
        self.drafts.get(path)
    }

    /// The error shown at `path`, if any.
    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.validation.error(path)
    }

    /// All errors currently shown.
    pub fn errors(&self) -> ErrorMap {
        self.validation.errors()
    }

    pub fn status(&self, path: &FieldPath) -> FieldStatus {
        self.validation.status(path)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    pub fn is_path_dirty(&self, path: &FieldPath) -> bool {
        self.dirty.is_path_dirty(path)
    }

    /// Dirty declared paths, in declaration order.
    pub fn changed_paths(&self) -> &[FieldPath] {
        self.dirty.changed()
    }

    pub fn read_only(&self) -> bool {
        self.options.read_only
    }

    pub fn disabled(&self) -> bool {
        self.options.disabled
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn focused(&self) -> Option<&FieldPath> {
        self.focused.as_ref()
    }

    pub fn state(&self) -> SubmissionState {
        match self.submission.phase() {
            Phase::Submitting(_) => SubmissionState::Submitting,
            Phase::Validating => SubmissionState::Validating,
            Phase::Idle if self.validation.has_server_errors() => SubmissionState::ServerRejected,
            Phase::Idle if self.dirty.is_dirty() => SubmissionState::Dirty,
            Phase::Idle => SubmissionState::Clean,
        }
    }

    /// State of the submit and cancel controls.
    ///
    /// Both need a dirty, unlocked form with no submission in flight.
    /// Submit additionally needs no field-level or whole-form error. Server
    /// errors leave the control enabled; they block the intent itself.
    pub fn controls(&self) -> Controls {
        let open = self.dirty.is_dirty() && !self.is_locked() && !self.submission.is_busy();
        Controls {
            visible: self.handler.is_some() || self.external_submit,
            submit_enabled: open && !self.validation.has_local_errors(),
            cancel_enabled: open,
            submit_label: self.labels.submit,
            cancel_label: self.labels.cancel,
        }
    }

    /// Read-only view for code rendered around the fields.
    pub fn context(&self) -> FormContext<'_> {
        FormContext::new(self)
    }

    pub fn render(&self) -> FormView {
        FormView {
            fields: self
                .definition
                .fields
                .iter()
                .map(|field| self.render_field(field))
                .collect(),
            controls: self.controls(),
            state: self.state(),
        }
    }

    /// Render the form and the `extra` slot next to it.
    pub fn render_with_extra<T>(&self, extra: impl FnOnce(&FormContext<'_>) -> T) -> (FormView, T) {
        (self.render(), extra(&self.context()))
    }

    fn render_field(&self, field: &FieldDeclaration) -> RenderedField {
        let path = field.path();
        let (renderer, mut props) = self.resolved(field);
        props.read_only |= self.options.read_only;
        props.disabled |= self.options.disabled;
        let view = FieldView {
            path: &path,
            label: field.label(),
            value: self.value(&path),
            props: &props,
            error: self.validation.error(&path),
        };
        let kind = match field.kind_key() {
            "" => DEFAULT_KIND,
            kind => kind,
        };
        RenderedField {
            widget: renderer.render(&view),
            kind: kind.to_string(),
            status: self.validation.status(&path),
            dirty: self.dirty.is_path_dirty(&path),
            focused: self.focused.as_ref() == Some(&path),
        }
    }

    // Internals

    fn is_locked(&self) -> bool {
        self.options.read_only || self.options.disabled
    }

    fn resolved(&self, field: &FieldDeclaration) -> (Arc<dyn FieldRenderer>, FieldProps) {
        let renderer = self.registry.resolve(field.kind_key());
        let props = field.props().merged_over(&renderer.defaults());
        (renderer, props)
    }

    fn recompute_dirty(&mut self) {
        let paths = self.definition.paths();
        self.dirty.recompute(&self.original, &self.transient, &paths);
    }

    fn commit(&mut self, path: FieldPath, value: ItemValue) {
        self.drafts.remove(&path);
        self.transient = resolve::set(&self.transient, &path, value);
        self.validation.edited(&path);
        self.recompute_dirty();
        self.validate_field(&path);
        self.validate_form();
    }

    fn reset_to(&mut self, original: ItemValue) {
        self.transient = original.clone();
        self.original = original;
        self.validation.clear();
        self.drafts.clear();
        self.recompute_dirty();
    }

    /// Run the field-level pass of `path` and record it.
    fn validate_field(&mut self, path: &FieldPath) -> Option<FieldFailure> {
        let field = self.definition.field(path)?;
        let (renderer, props) = self.resolved(field);
        if props.disabled {
            self.validation.record_field(path, Ok(()));
            return None;
        }
        self.validation.begin(path);
        let value = resolve::get(&self.transient, path);
        let outcome = validation::check_field(renderer.as_ref(), field, &props, value, &self.transient);
        let recorded = outcome.as_ref().map_err(|failure| failure.message(self.labels));
        self.validation.record_field(path, recorded.copied());
        outcome.err()
    }

    /// Run the whole-form validator. Messages for paths without a declared
    /// field are dropped: nothing could show them.
    fn validate_form(&mut self) {
        let Some(validator) = &self.validator else {
            return;
        };
        let declared = self.definition.paths();
        let returned = validator(&self.transient)
            .into_iter()
            .filter(|(path, _)| {
                let keep = declared.contains(path);
                if !keep {
                    tracing::debug!(%path, "form error for an undeclared path dropped");
                }
                keep
            })
            .collect();
        self.validation.apply_form(returned);
    }

    /// Field identity is `(path, renderer instance)`: a field whose
    /// renderer changed starts over as pristine.
    fn remount(&mut self) {
        let mut mounted = HashMap::new();
        for field in &self.definition.fields {
            let path = field.path();
            let id = registry::renderer_id(&self.registry.resolve(field.kind_key()));
            if self.mounted.get(&path).is_some_and(|old| *old != id) {
                tracing::debug!(%path, "field retyped");
                self.validation.reset_status(&path);
            }
            mounted.entry(path).or_insert(id);
        }
        self.mounted = mounted;
        self.validation.retain_paths(&self.definition.paths());
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("definition", &self.definition)
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("original", &self.original)
            .field("transient", &self.transient)
            .field("state", &self.state())
            .field("errors", &self.validation.errors())
            .field("handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}
