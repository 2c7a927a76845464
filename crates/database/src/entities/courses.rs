use chrono::NaiveDateTime;
use models::{
    catalog::CatalogCourse,
    course::{Category, CourseStatus, Level},
};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: String,
    pub category: Category,
    pub level: Level,
    pub status: CourseStatus,
    pub price: f64,
    pub original_price: Option<f64>,
    pub rating: f64,
    pub review_count: i32,
    pub enrollment_count: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogCourse for Model {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn category(&self) -> Category {
        self.category
    }

    fn level(&self) -> Level {
        self.level
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn enrollment_count(&self) -> i32 {
        self.enrollment_count
    }

    fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
