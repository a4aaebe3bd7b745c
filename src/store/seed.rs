//! Compiled-in default records.
//!
//! These are what `initialize` seeds and what every read falls back to when
//! a bucket is missing or unreadable.

use crate::model::{
    Attachment, AttachmentKind, BlockPosition, BlockType, DisplayBlock, DocumentCategory,
    GalleryAlbum, GalleryImage, MenuItem, Post, PostStatus, SchoolConfig, SchoolDocument,
    StaffMember, TargetPage, User, UserRole,
};
use crate::types::{Domain, DomainShape};
use serde::Serialize;
use serde_json::Value;

use super::schema::schema_for;

/// Default bucket content for `domain`, in stored (JSON) shape.
pub fn default_value(domain: Domain) -> Value {
    match domain {
        Domain::Settings => to_value(&default_config()),
        Domain::Posts => to_value(&default_posts()),
        Domain::Documents => to_value(&default_documents()),
        Domain::DocumentCategories => to_value(&default_document_categories()),
        Domain::Users => to_value(&default_users()),
        Domain::Gallery => to_value(&default_gallery()),
        Domain::Albums => to_value(&default_albums()),
        Domain::Menu => to_value(&default_menu()),
        Domain::Blocks => to_value(&default_blocks()),
        Domain::Staff => to_value(&default_staff()),
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize compiled-in defaults: {}", e);
        Value::Null
    })
}

/// Whether `value` has the shape the domain's bucket must have.
pub fn has_expected_shape(domain: Domain, value: &Value) -> bool {
    match schema_for(domain).shape {
        DomainShape::Object => value.is_object(),
        DomainShape::Collection => value.is_array(),
    }
}

pub fn default_config() -> SchoolConfig {
    SchoolConfig {
        name: "Trường PTDTBT TH và THCS Suối Lư".to_string(),
        slogan: "Trách nhiệm - Yêu thương - Sáng tạo".to_string(),
        logo_url: "https://upload.wikimedia.org/wikipedia/vi/1/13/Logo_THPT_Chuyen_Ha_Noi_-_Amsterdam.png".to_string(),
        favicon_url: Some(String::new()),
        banner_url: "https://i.imgur.com/8QZq1jS.jpeg".to_string(),
        principal_name: "Trần Thùy Dương".to_string(),
        address: "Số 1, Đường Hoàng Minh Giám, Quận Cầu Giấy, Hà Nội".to_string(),
        phone: "(024) 38463096".to_string(),
        email: "c3hanoi-ams@hanoiedu.vn".to_string(),
        hotline: "0988 123 456".to_string(),
        map_url: String::new(),
        facebook: "https://facebook.com".to_string(),
        youtube: "https://youtube.com".to_string(),
        zalo: None,
        website: "https://hn-ams.edu.vn".to_string(),
        show_welcome_banner: true,
        home_news_count: 6,
        home_show_program: true,
        primary_color: "#1e3a8a".to_string(),
        title_color: None,
        title_shadow_color: None,
        meta_title: "Trường THPT Chuyên Hà Nội - Amsterdam".to_string(),
        meta_description: "Cổng thông tin điện tử chính thức của Trường THPT Chuyên Hà Nội - Amsterdam. Cập nhật tin tức, sự kiện, tài liệu học tập mới nhất.".to_string(),
        footer_links: None,
    }
}

pub fn default_document_categories() -> Vec<DocumentCategory> {
    let cat = |id: &str, name: &str, slug: &str, description: &str, order: i64| DocumentCategory {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(description.to_string()),
        order,
    };
    vec![
        cat("cat_official", "Văn bản hành chính", "official", "Quyết định, thông báo chính thức", 1),
        cat("cat_resource", "Tài liệu học tập", "resource", "Đề cương, bài giảng", 2),
        cat("cat_timetable", "Thời khóa biểu", "timetable", "Lịch học các khối lớp", 3),
    ]
}

pub fn default_documents() -> Vec<SchoolDocument> {
    vec![
        SchoolDocument {
            id: "1".to_string(),
            number: "125/QĐ-THPT".to_string(),
            title: "Quyết định về việc thành lập Ban chỉ đạo thi THPT Quốc gia (Bản mẫu PDF)".to_string(),
            date: "2024-05-10".to_string(),
            category_id: "cat_official".to_string(),
            download_url: "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf".to_string(),
        },
        SchoolDocument {
            id: "2".to_string(),
            number: "TB-01".to_string(),
            title: "Thời khóa biểu học kỳ 1 năm học 2024-2025".to_string(),
            date: "2024-08-15".to_string(),
            category_id: "cat_timetable".to_string(),
            download_url: "#".to_string(),
        },
    ]
}

pub fn default_blocks() -> Vec<DisplayBlock> {
    let block = |id: &str,
                 name: &str,
                 position: BlockPosition,
                 block_type: BlockType,
                 order: i64,
                 item_count: u32,
                 target_page: TargetPage| DisplayBlock {
        id: id.to_string(),
        name: name.to_string(),
        position,
        block_type,
        order,
        item_count,
        is_visible: true,
        html_content: None,
        target_page,
        custom_color: None,
        custom_text_color: None,
    };
    use crate::model::BlockPosition::{Main, Sidebar};

    let mut links = block("block_sidebar_html", "Liên kết website", Sidebar, BlockType::Html, 3, 1, TargetPage::All);
    links.html_content = Some(
        "<ul class=\"space-y-2\"><li class=\"border-b pb-1\"><a href=\"#\">Bộ Giáo dục & Đào tạo</a></li>\
         <li class=\"border-b pb-1\"><a href=\"#\">Sở GD&ĐT Hà Nội</a></li>\
         <li class=\"border-b pb-1\"><a href=\"#\">Cổng thi đua khen thưởng</a></li></ul>"
            .to_string(),
    );

    vec![
        block("block_hero", "Slide Tin Nổi Bật", Main, BlockType::Hero, 1, 3, TargetPage::Home),
        block("block_latest", "Tin tức - Sự kiện", Main, BlockType::Grid, 2, 6, TargetPage::Home),
        block("block_activity", "Hoạt động Ngoại khóa", Main, BlockType::Highlight, 3, 4, TargetPage::Home),
        block("block_sidebar_latest", "TIN MỚI NHẤT", Sidebar, BlockType::List, 0, 10, TargetPage::All),
        block("block_sidebar_ann", "Thông báo mới", Sidebar, BlockType::List, 1, 5, TargetPage::All),
        block("block_sidebar_docs", "Tài liệu tải về", Sidebar, BlockType::Docs, 2, 5, TargetPage::All),
        links,
        block("block_stats", "Thống kê truy cập", Sidebar, BlockType::Stats, 4, 1, TargetPage::All),
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    title: &str,
    slug: &str,
    summary: &str,
    author: &str,
    date: &str,
    category: &str,
    tags: &[&str],
    views: u64,
    block_ids: &[&str],
) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        summary: summary.to_string(),
        content: format!("<p>{}</p>", summary),
        thumbnail: format!("https://picsum.photos/800/400?random={}", id),
        image_caption: None,
        author: author.to_string(),
        date: date.to_string(),
        category: category.to_string(),
        additional_categories: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        views,
        status: PostStatus::Published,
        published_at: None,
        is_featured: false,
        show_on_home: true,
        block_ids: block_ids.iter().map(|b| b.to_string()).collect(),
        attachments: Vec::new(),
    }
}

pub fn default_posts() -> Vec<Post> {
    let mut opening = post(
        "1",
        "Lễ Khai giảng năm học mới 2024-2025",
        "le-khai-giang-nam-hoc-moi-2024-2025",
        "Hòa chung không khí tưng bừng của cả nước, sáng ngày 5/9, thầy và trò nhà trường đã long trọng tổ chức Lễ khai giảng.",
        "Ban Truyền Thông",
        "2024-09-05",
        "news",
        &["khai giảng", "năm học mới"],
        1250,
        &["block_hero", "block_latest", "block_sidebar_latest"],
    );
    opening.is_featured = true;
    opening.image_caption = Some("Toàn cảnh lễ khai giảng".to_string());

    let mut exams = post(
        "2",
        "Thông báo lịch thi học kỳ I",
        "thong-bao-lich-thi-hoc-ky-i",
        "Nhà trường thông báo lịch thi học kỳ I cho toàn thể học sinh khối 10, 11, 12.",
        "Phòng Đào Tạo",
        "2024-11-20",
        "announcement",
        &["thi cử", "học kỳ 1"],
        890,
        &["block_sidebar_ann", "block_latest", "block_sidebar_latest"],
    );
    exams.image_caption = Some("Lịch thi chi tiết".to_string());
    exams.attachments.push(Attachment {
        id: "att1".to_string(),
        name: "Lịch thi chi tiết.pdf".to_string(),
        url: "#".to_string(),
        kind: AttachmentKind::File,
        file_type: Some("pdf".to_string()),
    });

    vec![
        opening,
        exams,
        post(
            "3",
            "Hội trại 26/3 - Sức trẻ thanh niên",
            "hoi-trai-26-3-suc-tre-thanh-nien",
            "Sôi động, nhiệt huyết và đầy sáng tạo là những gì diễn ra tại Hội trại chào mừng ngày thành lập Đoàn.",
            "Đoàn Thanh Niên",
            "2024-03-26",
            "activity",
            &["đoàn thanh niên", "ngoại khóa"],
            2100,
            &["block_activity", "block_latest", "block_sidebar_latest"],
        ),
        post(
            "4",
            "Hội thảo chuyên môn Toán học",
            "hoi-thao-chuyen-mon-toan-hoc",
            "Chia sẻ kinh nghiệm giảng dạy chương trình mới.",
            "Tổ Toán",
            "2024-10-15",
            "professional",
            &["chuyên môn", "toán"],
            450,
            &["block_professional", "block_latest", "block_sidebar_latest"],
        ),
        post(
            "5",
            "Hội thi Giao lưu toán tuổi thơ cấp xã",
            "hoi-thi-giao-luu-toan-tuoi-tho",
            "Sân chơi bổ ích cho học sinh vùng cao.",
            "Tổ Toán",
            "2024-12-05",
            "news",
            &["toán"],
            300,
            &["block_sidebar_latest"],
        ),
        post(
            "6",
            "Học sinh trường tham gia thi đấu thể thao",
            "thi-dau-the-thao",
            "Mừng đảng mừng xuân 2026",
            "Tổ Thể Dục",
            "2026-01-20",
            "activity",
            &["thể thao"],
            350,
            &["block_sidebar_latest"],
        ),
    ]
}

pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            username: "admin".to_string(),
            password: Some("admin123".to_string()),
            full_name: "Quản trị viên".to_string(),
            role: UserRole::Admin,
            email: "admin@school.edu.vn".to_string(),
        },
        User {
            id: "2".to_string(),
            username: "editor".to_string(),
            password: Some("123".to_string()),
            full_name: "Biên tập viên".to_string(),
            role: UserRole::Editor,
            email: "editor@school.edu.vn".to_string(),
        },
    ]
}

pub fn default_menu() -> Vec<MenuItem> {
    [
        ("1", "Trang chủ", "home", 1),
        ("2", "Giới thiệu", "intro", 2),
        ("6", "Đội ngũ GV", "staff", 3),
        ("3", "Tin tức", "news", 4),
        ("4", "Văn bản", "documents", 5),
        ("5", "Thư viện", "gallery", 6),
    ]
    .into_iter()
    .map(|(id, label, path, order)| MenuItem {
        id: id.to_string(),
        label: label.to_string(),
        path: path.to_string(),
        order,
    })
    .collect()
}

pub fn default_albums() -> Vec<GalleryAlbum> {
    [
        ("album_1", "Hoạt động Khai giảng 2024", "Hình ảnh lễ khai giảng năm học mới", 10, "2024-09-05"),
        ("album_2", "Hội thi văn nghệ 20/11", "Chào mừng ngày nhà giáo Việt Nam", 11, "2024-11-20"),
        ("album_3", "Hoạt động Ngoại khóa", "Các hoạt động trải nghiệm sáng tạo", 12, "2024-12-15"),
    ]
    .into_iter()
    .map(|(id, title, description, image, created)| GalleryAlbum {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        thumbnail: format!("https://picsum.photos/600/400?random={}", image),
        created_date: created.to_string(),
    })
    .collect()
}

pub fn default_gallery() -> Vec<GalleryImage> {
    [
        ("1", 10, "Khai giảng 1", "album_1"),
        ("2", 20, "Khai giảng 2", "album_1"),
        ("3", 11, "Văn nghệ 1", "album_2"),
        ("4", 12, "Ngoại khóa 1", "album_3"),
    ]
    .into_iter()
    .map(|(id, image, caption, album)| GalleryImage {
        id: id.to_string(),
        url: format!("https://picsum.photos/600/400?random={}", image),
        caption: caption.to_string(),
        album_id: album.to_string(),
    })
    .collect()
}

pub fn default_staff() -> Vec<StaffMember> {
    vec![
        StaffMember {
            id: "1".to_string(),
            full_name: "Nguyễn Văn A".to_string(),
            position: "Hiệu trưởng".to_string(),
            party_date: None,
            email: "ht@school.edu.vn".to_string(),
            avatar_url: String::new(),
            order: 1,
        },
        StaffMember {
            id: "2".to_string(),
            full_name: "Trần Thị B".to_string(),
            position: "Phó Hiệu trưởng".to_string(),
            party_date: None,
            email: "hp@school.edu.vn".to_string(),
            avatar_url: String::new(),
            order: 2,
        },
    ]
}
