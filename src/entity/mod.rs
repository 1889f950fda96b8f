pub mod shopping_list_items;
pub mod shopping_lists;
pub mod users;

pub use shopping_list_items::Entity as ShoppingListItems;
pub use shopping_lists::Entity as ShoppingLists;
pub use users::Entity as Users;
