//! Controllers behind the create/edit views
use crate::{
    contest::{Contest, ContestForm},
    entity::Entity,
    error::{Error, FieldError, Result},
    navigation::Navigator,
    picture::{Picture, PictureForm},
    service::{EntityService, QueryOptions},
    transport::Transport,
};
use tracing::{debug, warn};

/// The editable representation of an [Entity]
pub trait EntityForm: Default + Send {
    type Entity: Entity;

    /// Fill in defaults for an object that does not exist on the server yet
    fn prepare_new(&self, _entity: &mut Self::Entity) {}

    /// Replace the form values with the values of `entity`
    fn update_form(&mut self, entity: &Self::Entity) -> Result<()>;

    /// Build an object from the current form values. Fails with
    /// [Error::Validation] if a required value is missing.
    fn create_from_form(&self) -> Result<Self::Entity>;
}

pub(crate) fn required_field(
    value: &Option<String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(FieldError {
                field,
                reason: "is required",
            });
            String::new()
        }
    }
}

/// Where an edit view is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EditState {
    /// The view has not received its object yet
    Initial,
    /// The form is shown and can be changed
    Editing,
    /// A create or update request is in flight
    Saving,
}

/// The result of submitting an edit form
#[derive(Debug)]
pub enum SaveOutcome<E> {
    /// The server accepted the object; the view has navigated back
    Saved(E),
    /// The server rejected the request or could not be reached. The view stays on
    /// the form and does not show the error.
    Failed(Error),
}

impl<E> SaveOutcome<E> {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Drives an edit form for objects of type `F::Entity`
pub struct UpdateController<F: EntityForm, T> {
    service: EntityService<F::Entity, T>,
    form: F,
    state: EditState,
}

impl<F: EntityForm, T: Transport> UpdateController<F, T> {
    pub fn new(service: EntityService<F::Entity, T>) -> Self {
        Self::with_form(service, F::default())
    }

    pub fn with_form(service: EntityService<F::Entity, T>, form: F) -> Self {
        Self {
            service,
            form,
            state: EditState::Initial,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_saving(&self) -> bool {
        self.state == EditState::Saving
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Show the object supplied by the resolver in the form
    pub fn activate(&mut self, mut entity: F::Entity) -> Result<()> {
        if !entity.is_persisted() {
            self.form.prepare_new(&mut entity);
        }
        self.form.update_form(&entity)?;
        self.state = EditState::Editing;
        Ok(())
    }

    /// Submit the form. Objects without an id are created, all others are updated.
    ///
    /// Returns an error without sending anything if the form is not being edited or
    /// is invalid. A failed request is reported as [SaveOutcome::Failed] and leaves
    /// the form as it was.
    pub async fn save(&mut self, navigator: &mut dyn Navigator) -> Result<SaveOutcome<F::Entity>> {
        if self.state != EditState::Editing {
            return Err(Error::InvalidOperation(format!(
                "cannot save a {} form in state {}",
                F::Entity::NAME,
                self.state
            )));
        }
        let entity = self.form.create_from_form()?;
        self.state = EditState::Saving;
        let result = match entity.id() {
            Some(id) => {
                debug!(resource = F::Entity::RESOURCE, id, "updating");
                self.service.update(&entity).await
            }
            None => {
                debug!(resource = F::Entity::RESOURCE, "creating");
                self.service.create(&entity).await
            }
        };
        self.state = EditState::Editing;
        match result {
            Ok(saved) => {
                self.previous_state(navigator);
                Ok(SaveOutcome::Saved(saved))
            }
            Err(e) => {
                warn!(resource = F::Entity::RESOURCE, error = %e, "save failed");
                Ok(SaveOutcome::Failed(e))
            }
        }
    }

    /// Leave the edit view
    pub fn previous_state(&self, navigator: &mut dyn Navigator) {
        navigator.previous_state();
    }
}

/// The edit view for contests
pub type ContestUpdate<T> = UpdateController<ContestForm, T>;

/// The edit view for pictures. Besides the form it keeps the list of contests the
/// picture can be assigned to.
pub struct PictureUpdate<T> {
    controller: UpdateController<PictureForm, T>,
    contest_service: EntityService<Contest, T>,
    contests_shared_collection: Vec<Contest>,
}

impl<T: Transport> PictureUpdate<T> {
    pub fn new(
        picture_service: EntityService<Picture, T>,
        contest_service: EntityService<Contest, T>,
    ) -> Self {
        Self {
            controller: UpdateController::new(picture_service),
            contest_service,
            contests_shared_collection: Vec::new(),
        }
    }

    /// Show the resolved picture and load the contest options. The picture's
    /// current contest is always part of the options, even when the server would not
    /// list it on the first page.
    pub async fn activate(&mut self, picture: Picture) -> Result<()> {
        self.controller.activate(picture)?;
        let current = self.controller.form().contest_id.clone();
        let options = std::mem::take(&mut self.contests_shared_collection);
        self.contests_shared_collection = self
            .contest_service
            .add_to_collection_if_missing(options, [current]);
        self.load_relationships_options().await;
        Ok(())
    }

    async fn load_relationships_options(&mut self) {
        match self.contest_service.query(&QueryOptions::default()).await {
            Ok(contests) => {
                let current = self.controller.form().contest_id.clone();
                self.contests_shared_collection = self
                    .contest_service
                    .add_to_collection_if_missing(contests, [current]);
            }
            Err(e) => warn!(error = %e, "unable to load contest options"),
        }
    }

    pub fn contests_shared_collection(&self) -> &[Contest] {
        &self.contests_shared_collection
    }

    pub fn track_contest_by_id(&self, contest: &Contest) -> Option<i64> {
        contest.id()
    }

    /// Select one of the contest options by id, or clear the selection with `None`
    pub fn select_contest(&mut self, id: Option<i64>) -> Result<()> {
        let selected = match id {
            None => None,
            Some(id) => Some(
                self.contests_shared_collection
                    .iter()
                    .find(|c| c.id == Some(id))
                    .cloned()
                    .ok_or(Error::NotFound {
                        resource: Contest::NAME,
                        id,
                    })?,
            ),
        };
        self.controller.form_mut().contest_id = selected;
        Ok(())
    }

    pub fn controller(&self) -> &UpdateController<PictureForm, T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut UpdateController<PictureForm, T> {
        &mut self.controller
    }

    pub fn form_mut(&mut self) -> &mut PictureForm {
        self.controller.form_mut()
    }

    pub async fn save(&mut self, navigator: &mut dyn Navigator) -> Result<SaveOutcome<Picture>> {
        self.controller.save(navigator).await
    }
}
