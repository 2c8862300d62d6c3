use anyhow::Result;
use sea_orm::{entity::prelude::*, FromQueryResult, QueryOrder, QuerySelect, Set};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    #[serde(skip)]
    pub image_data: Option<Vec<u8>>,
    pub image_mime: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A row of the team list.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct TeamSummary {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Everything the detail page shows, without the image bytes.
#[derive(Debug, FromQueryResult, Serialize)]
pub struct TeamDetail {
    pub code: String,
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub image_mime: Option<String>,
}

#[derive(Debug, FromQueryResult)]
pub struct TeamImage {
    pub image_data: Option<Vec<u8>>,
    pub image_mime: Option<String>,
}

/// A team ready to be stored. Text fields are expected to be escaped already.
#[derive(Debug)]
pub struct NewTeam {
    pub code: String,
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub image_data: Vec<u8>,
    pub image_mime: String,
}

impl From<NewTeam> for ActiveModel {
    fn from(team: NewTeam) -> Self {
        ActiveModel {
            code: Set(team.code),
            name: Set(team.name),
            description: Set(team.description),
            website: Set(team.website),
            image_data: Set(Some(team.image_data)),
            image_mime: Set(Some(team.image_mime)),
        }
    }
}

pub async fn list<C: ConnectionTrait>(conn: &C) -> Result<Vec<TeamSummary>> {
    let teams = Entity::find()
        .select_only()
        .columns([Column::Code, Column::Name, Column::Description])
        .order_by_asc(Column::Name)
        .into_model::<TeamSummary>()
        .all(conn)
        .await?;

    Ok(teams)
}

pub async fn get_by_code<C: ConnectionTrait>(conn: &C, code: &str) -> Result<Option<TeamDetail>> {
    let team = Entity::find()
        .select_only()
        .columns([
            Column::Code,
            Column::Name,
            Column::Description,
            Column::Website,
            Column::ImageMime,
        ])
        .filter(Column::Code.eq(code))
        .into_model::<TeamDetail>()
        .one(conn)
        .await?;

    Ok(team)
}

pub async fn get_image<C: ConnectionTrait>(conn: &C, code: &str) -> Result<Option<TeamImage>> {
    let image = Entity::find()
        .select_only()
        .columns([Column::ImageData, Column::ImageMime])
        .filter(Column::Code.eq(code))
        .into_model::<TeamImage>()
        .one(conn)
        .await?;

    Ok(image)
}

/// Duplicate codes are left to the table's primary key to reject.
pub async fn insert<C: ConnectionTrait>(conn: &C, team: NewTeam) -> Result<()> {
    let model: ActiveModel = team.into();
    Entity::insert(model).exec_without_returning(conn).await?;
    Ok(())
}

/// Returns how many rows went away. Players of the team are kept.
pub async fn delete_by_code<C: ConnectionTrait>(conn: &C, code: &str) -> Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::Code.eq(code))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}
