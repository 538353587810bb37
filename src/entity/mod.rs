pub mod account_profiles;
pub mod audit_logs;
pub mod cart_items;
pub mod carts;
pub mod credit_recharges;
pub mod orders;
pub mod streaming_accounts;
pub mod streaming_types;
pub mod users;

pub use account_profiles::Entity as AccountProfiles;
pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use carts::Entity as Carts;
pub use credit_recharges::Entity as CreditRecharges;
pub use orders::Entity as Orders;
pub use streaming_accounts::Entity as StreamingAccounts;
pub use streaming_types::Entity as StreamingTypes;
pub use users::Entity as Users;
