use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde_json::Value;
use uuid::Uuid;
use vx_dao::resource::{ResourceCollection, ResourceDao};

use crate::{
    context::ApiRestCtx,
    guard,
    model::{
        resource::{FindManyResourceReqQuery, ResourceReqPath},
        DeleteResJson, Response,
    },
};

/// URL segment(s) under `/api` for each collection.
const MOUNTS: [(&str, ResourceCollection); 9] = [
    ("/services", ResourceCollection::Services),
    ("/case-studies", ResourceCollection::CaseStudies),
    ("/casestudies", ResourceCollection::CaseStudies),
    ("/blog", ResourceCollection::BlogPosts),
    ("/careers", ResourceCollection::Careers),
    ("/applications", ResourceCollection::Applications),
    ("/team", ResourceCollection::TeamMembers),
    ("/partners", ResourceCollection::Partners),
    ("/reviews", ResourceCollection::Reviews),
];

pub fn resource_api(cfg: &mut web::ServiceConfig) {
    for (path, collection) in MOUNTS {
        cfg.service(
            web::scope(path)
                .app_data(web::Data::new(collection))
                .route("", web::get().to(find_many))
                .route("", web::post().to(insert_one))
                .route("/{id}", web::get().to(find_one))
                .route("/{id}", web::put().to(replace_one))
                .route("/{id}", web::patch().to(update_one))
                .route("/{id}", web::delete().to(delete_one)),
        );
    }
}

/// Job applications are submitted by visitors but only admins may read them.
fn is_public_read(collection: &ResourceCollection) -> bool {
    *collection != ResourceCollection::Applications
}

fn is_public_insert(collection: &ResourceCollection) -> bool {
    *collection == ResourceCollection::Applications
}

async fn find_many(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    query: web::Query<FindManyResourceReqQuery>,
) -> HttpResponse {
    let is_admin = if is_public_read(&collection) {
        query.all() && guard::admin_claim(&ctx, &auth).is_ok()
    } else {
        match guard::admin_claim(&ctx, &auth) {
            Ok(_) => true,
            Err(err) => return Response::error(&err, ctx.mode()),
        }
    };

    match ResourceDao::db_select_many(ctx.dao().db(), &collection).await {
        Ok(data) => Response::data(
            &StatusCode::OK,
            data.iter()
                .filter(|data| is_admin || data.is_visible())
                .map(ResourceDao::to_json)
                .collect::<Vec<_>>(),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    path: web::Path<ResourceReqPath>,
) -> HttpResponse {
    if !is_public_read(&collection) {
        if let Err(err) = guard::admin_claim(&ctx, &auth) {
            return Response::error(&err, ctx.mode());
        }
    }

    match ResourceDao::db_select(ctx.dao().db(), &collection, path.id()).await {
        Ok(data) => Response::data(&StatusCode::OK, data.to_json()),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    data: web::Json<Value>,
) -> HttpResponse {
    if !is_public_insert(&collection) {
        if let Err(err) = guard::admin_claim(&ctx, &auth) {
            return Response::error(&err, ctx.mode());
        }
    }

    let mut resource_data = match ResourceDao::new(&collection, data.into_inner()) {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    match resource_data.db_insert(ctx.dao().db()).await {
        Ok(_) => Response::data(&StatusCode::CREATED, resource_data.to_json()),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn replace_one(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    path: web::Path<ResourceReqPath>,
    data: web::Json<Value>,
) -> HttpResponse {
    write_one(&ctx, &collection, &auth, path.id(), data.into_inner(), false).await
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    path: web::Path<ResourceReqPath>,
    data: web::Json<Value>,
) -> HttpResponse {
    write_one(&ctx, &collection, &auth, path.id(), data.into_inner(), true).await
}

async fn write_one(
    ctx: &ApiRestCtx,
    collection: &ResourceCollection,
    auth: &Option<BearerAuth>,
    id: &Uuid,
    data: Value,
    merge: bool,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(ctx, auth) {
        return Response::error(&err, ctx.mode());
    }

    let mut resource_data = match ResourceDao::db_select(ctx.dao().db(), collection, id).await {
        Ok(data) => data,
        Err(err) => return Response::error(&err, ctx.mode()),
    };

    let applied = if merge {
        resource_data.merge(data)
    } else {
        resource_data.replace(data)
    };
    if let Err(err) = applied {
        return Response::error(&err, ctx.mode());
    }

    match resource_data.db_update(ctx.dao().db()).await {
        Ok(_) => Response::data(&StatusCode::OK, resource_data.to_json()),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    collection: web::Data<ResourceCollection>,
    auth: Option<BearerAuth>,
    path: web::Path<ResourceReqPath>,
) -> HttpResponse {
    if let Err(err) = guard::admin_claim(&ctx, &auth) {
        return Response::error(&err, ctx.mode());
    }

    match ResourceDao::db_delete(ctx.dao().db(), &collection, path.id()).await {
        Ok(_) => Response::data(
            &StatusCode::OK,
            DeleteResJson::new("Item deleted successfully"),
        ),
        Err(err) => Response::error(&err, ctx.mode()),
    }
}
