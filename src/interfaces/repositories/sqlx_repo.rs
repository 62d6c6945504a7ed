use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxScholarshipRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxPageRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxInquiryRepo {
    pub pool: PgPool,
}
