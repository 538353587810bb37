use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub streaming_account_id: Uuid,
    pub profile_name: String,
    pub profile_pin: Option<String>,
    pub is_available: bool,
    pub sold_to_user_id: Option<Uuid>,
    pub sold_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::streaming_accounts::Entity",
        from = "Column::StreamingAccountId",
        to = "super::streaming_accounts::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SoldToUserId",
        to = "super::users::Column::Id"
    )]
    Buyer,
}

impl Related<super::streaming_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
