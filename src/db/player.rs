use anyhow::Result;
use sea_orm::{entity::prelude::*, QueryOrder, Set};
use serde::Serialize;

/// `team` holds a team code but is deliberately not a foreign key: players may
/// outlive their team.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,
    pub name: String,
    pub notes: String,
    pub team: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new_from(name: String, notes: String, team: String) -> Self {
        ActiveModel {
            name: Set(name),
            notes: Set(notes),
            team: Set(team),
            ..Default::default()
        }
    }
}

pub async fn list_for_team<C: ConnectionTrait>(conn: &C, team: &str) -> Result<Vec<Model>> {
    let players = Entity::find()
        .filter(Column::Team.eq(team))
        .order_by_asc(Column::Name)
        .all(conn)
        .await?;

    Ok(players)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    name: String,
    notes: String,
    team: String,
) -> Result<()> {
    let model = ActiveModel::new_from(name, notes, team);
    Entity::insert(model).exec_without_returning(conn).await?;
    Ok(())
}
