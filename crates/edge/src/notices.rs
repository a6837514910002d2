// crates/edge/src/notices.rs

use crate::{
    admin::{admin_page, require},
    state::AppState,
    Error,
};
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use chrono::Utc;
use domain::{
    capability::{AccessControl, Capability, Viewer},
    notice::{sort_newest_first, Notice, NoticeDraft},
};
use serve::{
    registry::Screen,
    render::{
        notice::{edit_notice_path, NOTICES_PATH, NOTICE_DATE_FORMAT},
        template::{NoticeFormModel, NoticeListModel, NoticeRow, Templates},
    },
};
use uuid::Uuid;

fn form_page(
    app: &AppState,
    viewer: &Viewer,
    title: &str,
    model: &NoticeFormModel,
) -> Result<Html<String>, Error> {
    let body = app.templates.render(Templates::NOTICE_FORM, model)?;
    admin_page(app, viewer, title, Screen::Notices, body)
}

/// Load a notice the viewer may edit: 404 if missing, 403 if not theirs.
async fn editable(app: &AppState, viewer: &Viewer, id: Uuid) -> Result<Notice, Error> {
    let notice = app.notices.get(id).await?.ok_or(Error::NotFound)?;
    if !viewer.can_edit_notice(&notice) {
        return Err(Error::Forbidden(
            "Sorry, you are not allowed to edit this notice.",
        ));
    }
    Ok(notice)
}

fn invalid_draft(
    app: &AppState,
    viewer: &Viewer,
    title: &str,
    mut model: NoticeFormModel,
    reason: impl std::fmt::Display,
) -> Result<Response, Error> {
    model.errors = vec![format!("Title: {reason}")];
    let page = form_page(app, viewer, title, &model)?;
    Ok((StatusCode::BAD_REQUEST, page).into_response())
}

#[tracing::instrument(skip_all)]
pub async fn list(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Html<String>, Error> {
    require(&viewer, Capability::EditPosts)?;

    let mut notices = app.notices.list().await?;
    sort_newest_first(&mut notices);

    let model = NoticeListModel {
        notices: notices
            .iter()
            .map(|n| {
                let editable = viewer.can_edit_notice(n);
                NoticeRow {
                    title: n.title.clone(),
                    author: n.author.clone(),
                    date: n.created_at.format(NOTICE_DATE_FORMAT).to_string(),
                    edit_href: editable.then(|| edit_notice_path(n)),
                    delete_href: editable.then(|| format!("{NOTICES_PATH}/{}/delete", n.id)),
                }
            })
            .collect(),
        can_create: viewer.can(Capability::EditPosts),
    };
    let body = app.templates.render(Templates::NOTICE_LIST, &model)?;
    admin_page(&app, &viewer, "Admin Notices", Screen::Notices, body)
}

#[tracing::instrument(skip_all)]
pub async fn new_form(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Html<String>, Error> {
    require(&viewer, Capability::EditPosts)?;
    let model = NoticeFormModel {
        action: NOTICES_PATH.to_string(),
        submit: "Publish",
        ..NoticeFormModel::default()
    };
    form_page(&app, &viewer, "Add New Admin Notice", &model)
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Form(draft): Form<NoticeDraft>,
) -> Result<Response, Error> {
    require(&viewer, Capability::EditPosts)?;

    let submitted = NoticeFormModel {
        action: NOTICES_PATH.to_string(),
        submit: "Publish",
        title: draft.title.clone(),
        body: draft.body.clone(),
        errors: Vec::new(),
    };
    let draft = match draft.validate() {
        Ok(d) => d,
        Err(e) => return invalid_draft(&app, &viewer, "Add New Admin Notice", submitted, e),
    };

    let notice = Notice::new(draft, viewer.name.clone(), Utc::now());
    tracing::info!(id = %notice.id, author = %notice.author, "notice created");
    app.notices.insert(notice).await?;
    Ok(Redirect::to(NOTICES_PATH).into_response())
}

#[tracing::instrument(skip_all, fields(%id))]
pub async fn edit_form(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, Error> {
    let notice = editable(&app, &viewer, id).await?;
    let model = NoticeFormModel {
        action: format!("{NOTICES_PATH}/{id}"),
        submit: "Update",
        title: notice.title,
        body: notice.body,
        errors: Vec::new(),
    };
    form_page(&app, &viewer, "Edit Admin Notice", &model)
}

#[tracing::instrument(skip_all, fields(%id))]
pub async fn update(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<Uuid>,
    Form(draft): Form<NoticeDraft>,
) -> Result<Response, Error> {
    let mut notice = editable(&app, &viewer, id).await?;

    let submitted = NoticeFormModel {
        action: format!("{NOTICES_PATH}/{id}"),
        submit: "Update",
        title: draft.title.clone(),
        body: draft.body.clone(),
        errors: Vec::new(),
    };
    let draft = match draft.validate() {
        Ok(d) => d,
        Err(e) => return invalid_draft(&app, &viewer, "Edit Admin Notice", submitted, e),
    };

    notice.apply(draft);
    app.notices.update(notice).await?;
    tracing::info!(user = %viewer.name, "notice updated");
    Ok(Redirect::to(NOTICES_PATH).into_response())
}

#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete(
    State(app): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<Uuid>,
) -> Result<Response, Error> {
    editable(&app, &viewer, id).await?;
    app.notices.delete(id).await?;
    tracing::info!(user = %viewer.name, "notice deleted");
    Ok(Redirect::to(NOTICES_PATH).into_response())
}
