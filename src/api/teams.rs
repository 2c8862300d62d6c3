use poem::{
    handler,
    http::StatusCode,
    session::Session,
    web::{Data, Html, Multipart, Path, Redirect},
    Error, IntoResponse, Response, Result,
};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    api::{image::image_response, params::AddTeamParams},
    db::{
        player,
        team::{self, NewTeam},
        Db,
    },
    imaging,
    view::{
        flash::{flash, take_flashes},
        Views,
    },
};

#[handler]
pub async fn index(
    Data(db): Data<&Db>,
    Data(views): Data<&Views>,
    session: &Session,
) -> Result<Html<String>> {
    let teams = team::list(db.conn()).await?;

    let page = views.render(
        "pages/home.html",
        &json!({ "teams": teams, "flashes": take_flashes(session) }),
    )?;
    Ok(page)
}

#[handler]
pub async fn show(
    Path(code): Path<String>,
    Data(db): Data<&Db>,
    Data(views): Data<&Views>,
) -> Result<Response> {
    let Some(team) = team::get_by_code(db.conn(), &code).await? else {
        return Ok(views.not_found()?);
    };

    let players = player::list_for_team(db.conn(), &code).await?;

    let page = views.render("pages/team.html", &json!({ "team": team, "players": players }))?;
    Ok(page.into_response())
}

#[handler]
pub async fn add(
    multipart: Result<Multipart>,
    Data(db): Data<&Db>,
    session: &Session,
) -> Result<Redirect> {
    // a body that is not multipart cannot carry the image either
    let Ok(multipart) = multipart else {
        return Err(upload_missing());
    };
    let params = AddTeamParams::from_multipart(multipart).await?;

    let Some(upload) = params.image else {
        return Err(upload_missing());
    };

    let name = AddTeamParams::required(params.name, "name")?;
    let code = AddTeamParams::required(params.code, "code")?;
    let description = AddTeamParams::required(params.description, "description")?;
    let website = AddTeamParams::required(params.website, "website")?;

    let normalized = tokio::task::spawn_blocking(move || imaging::normalize(&upload.blob))
        .await
        .map_err(anyhow::Error::from)??;
    debug!(
        declared = ?upload.content_type,
        stored = normalized.mime,
        "image normalized to {}x{}",
        normalized.width,
        normalized.height
    );

    team::insert(
        db.conn(),
        NewTeam {
            code: code.clone(),
            name: name.clone(),
            description,
            website: Some(website).filter(|w| !w.is_empty()),
            image_data: normalized.blob,
            image_mime: normalized.mime.to_string(),
        },
    )
    .await?;
    info!(%code, "team added");

    flash(session, "success", format!("Team '{name}' added"));
    Ok(Redirect::see_other("/"))
}

#[handler]
pub async fn delete(
    Path(code): Path<String>,
    Data(db): Data<&Db>,
    session: &Session,
) -> Result<Redirect> {
    let removed = team::delete_by_code(db.conn(), &code).await?;
    info!(%code, removed, "team deleted");

    flash(session, "success", "Team deleted");
    Ok(Redirect::see_other("/"))
}

#[handler]
pub async fn image(Path(code): Path<String>, Data(db): Data<&Db>) -> Result<Response> {
    let image = team::get_image(db.conn(), &code).await?;
    Ok(image_response(image))
}

fn upload_missing() -> Error {
    Error::from_string("Problem uploading image", StatusCode::INTERNAL_SERVER_ERROR)
}
