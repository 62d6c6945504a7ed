use serde::Serialize;

use crate::entities::{inquiry::ContactInquiry, scholarship::ScholarshipSummary};

pub const RECENT_ITEMS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_scholarships: i64,
    pub active_scholarships: i64,
    pub total_pages: i64,
    pub published_pages: i64,
    pub total_inquiries: i64,
    pub unread_inquiries: i64,
    pub recent_inquiries: Vec<ContactInquiry>,
    pub recent_scholarships: Vec<ScholarshipSummary>,
}
