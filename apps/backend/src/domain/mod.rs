pub mod drink;

pub use drink::{Drink, DrinkLong, DrinkShort, Ingredient, NewDrink, Recipe, ShortIngredient};
