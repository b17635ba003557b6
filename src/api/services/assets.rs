use actix_web::{HttpResponse, Responder, web};
use rust_embed::Embed;
use tracing::trace;

// 编译期嵌入样式表等静态文件
#[derive(Embed)]
#[folder = "assets/"]
struct StaticAssets;

pub struct AssetService;

impl AssetService {
    pub async fn handle_asset(path: web::Path<String>) -> impl Responder {
        let path = path.into_inner();

        match StaticAssets::get(&path) {
            Some(file) => {
                trace!("Serving asset: {}", path);
                HttpResponse::Ok()
                    .content_type(Self::get_content_type(&path))
                    .insert_header(("Cache-Control", "public, max-age=3600"))
                    .body(file.data.into_owned())
            }
            None => HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body("Not Found"),
        }
    }

    /// 根据文件扩展名确定 Content-Type
    fn get_content_type(path: &str) -> &'static str {
        match path.split('.').next_back() {
            Some("css") => "text/css; charset=utf-8",
            Some("js") => "application/javascript",
            Some("png") => "image/png",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_is_embedded() {
        assert!(StaticAssets::get("style.css").is_some());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(AssetService::get_content_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(AssetService::get_content_type("blob"), "application/octet-stream");
    }
}
