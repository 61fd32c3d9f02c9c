use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    pub username: String,

    /// Textual login instant, NULL if the user never logged in.
    pub last_login: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inactive_log::Entity")]
    InactiveLog,
}

impl Related<super::inactive_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InactiveLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
