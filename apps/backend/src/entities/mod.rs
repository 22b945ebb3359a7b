pub mod drinks;

pub use drinks::Entity as Drinks;
pub use drinks::Model as DrinkRow;
