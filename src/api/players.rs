use poem::{
    handler,
    web::{Data, Form, Redirect},
    Result,
};
use tracing::info;

use crate::{
    api::{params::AddPlayerForm, team_path},
    db::{player, Db},
};

/// No check that the team exists; the roster row is stored either way.
#[handler]
pub async fn add(Form(form): Form<AddPlayerForm>, Data(db): Data<&Db>) -> Result<Redirect> {
    let AddPlayerForm { name, notes, team } = form.escaped();
    let location = team_path(&team)?;

    player::insert(db.conn(), name, notes, team).await?;
    info!(%location, "player added");

    Ok(Redirect::see_other(location))
}
