// Mirrors sql/schema.sql. The tables keep their original mixed-case names.

diesel::table! {
    #[sql_name = "Ingredients"]
    ingredients (id) {
        #[sql_name = "ID"]
        id -> Int4,
        #[sql_name = "Name"]
        name -> Varchar,
    }
}

diesel::table! {
    #[sql_name = "Recipe"]
    recipe (id) {
        #[sql_name = "ID"]
        id -> Int4,
        #[sql_name = "Name"]
        name -> Varchar,
        #[sql_name = "Serving_quantity"]
        serving_quantity -> Nullable<Varchar>,
        #[sql_name = "Preparing_time"]
        preparing_time -> Nullable<Varchar>,
        #[sql_name = "Skill_level"]
        skill_level -> Nullable<Varchar>,
        #[sql_name = "Instructions"]
        instructions -> Nullable<Text>,
        #[sql_name = "Notes"]
        notes -> Nullable<Text>,
    }
}

diesel::table! {
    #[sql_name = "Recipe_Ingredients"]
    recipe_ingredients (recipe_id, ingredient_id) {
        #[sql_name = "Recipe_ID"]
        recipe_id -> Int4,
        #[sql_name = "Ingredient_ID"]
        ingredient_id -> Int4,
        #[sql_name = "Quantity_used"]
        quantity_used -> Nullable<Float8>,
        #[sql_name = "Unit"]
        unit -> Nullable<Varchar>,
    }
}

diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_ingredients -> recipe (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(ingredients, recipe, recipe_ingredients,);
