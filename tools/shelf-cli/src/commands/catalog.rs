//! Catalog browsing: categories, products and reviews.

use anyhow::{Context as _, Result};
use shelf_commerce::catalog::{Product, Rating, ReviewSubmission};

use super::{ProductArgs, ProductsArgs, ReviewsArgs};
use crate::context::Context;
use crate::output::{format_rating, truncate};

const PRODUCT_WIDTHS: [usize; 5] = [4, 42, 9, 12, 24];

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let categories = client.categories().await.context("Failed to fetch categories")?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.list_item(&format!("{} ({})", category.name, category.slug));
        if let Some(description) = &category.description {
            ctx.output.kv("  ", description);
        }
    }
    Ok(())
}

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let (title, products) = if args.featured {
        ("Featured".to_string(), client.featured_products().await)
    } else if args.bestsellers {
        ("Bestsellers".to_string(), client.bestseller_products().await)
    } else if let Some(slug) = &args.category {
        let category = client
            .category(slug)
            .await
            .context("Failed to fetch category")?
            .with_context(|| format!("Category not found: {slug}"))?;
        (category.name, client.products(Some(category.id)).await)
    } else {
        ("All products".to_string(), client.products(None).await)
    };
    let products = args.filter().apply(products.context("Failed to fetch products")?);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    match args.sort {
        Some(sort) => ctx.output.header(&format!("{title} ({})", sort.display_name())),
        None => ctx.output.header(&title),
    }
    if products.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }
    print_products(ctx, &products);
    Ok(())
}

fn print_products(ctx: &Context, products: &[Product]) {
    ctx.output
        .table_row(&["ID", "NAME", "TYPE", "PRICE", "RATING"], &PRODUCT_WIDTHS);
    for product in products {
        let mut name = product.name.clone();
        if product.is_bestseller {
            name.push_str(" *");
        }
        let id = product.id.to_string();
        let name = truncate(&name, PRODUCT_WIDTHS[1]);
        let price = product.price.display();
        let rating = format_rating(product);
        ctx.output.table_row(
            &[
                id.as_str(),
                name.as_str(),
                product.product_type.display_name(),
                price.as_str(),
                rating.as_str(),
            ],
            &PRODUCT_WIDTHS,
        );
    }
}

/// Run the product command.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let product = client
        .product(&args.slug)
        .await
        .context("Failed to fetch product")?
        .with_context(|| format!("Product not found: {}", args.slug))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv("Type", product.product_type.display_name());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Rating", &format_rating(&product));
    if product.is_bestseller {
        ctx.output.kv("Bestseller", "yes");
    }
    if product.is_featured {
        ctx.output.kv("Featured", "yes");
    }
    ctx.output.info("");
    ctx.output.info(&product.description);
    ctx.output.info("");
    ctx.output
        .info(&format!("Add it with: shelf cart add {}", product.slug));
    Ok(())
}

/// Run the reviews command; adds a review first when a rating is given.
pub async fn reviews(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    if let Some(rating) = args.rating {
        let submission = ReviewSubmission {
            user_id: ctx.user_id()?,
            rating: Rating::new(rating)?,
            comment: args.comment,
        };
        let review = client
            .create_review(args.product_id, &submission)
            .await
            .context("Failed to submit review")?;
        ctx.output
            .success(&format!("Review #{} added", review.id));
    }

    let reviews = client
        .reviews(args.product_id)
        .await
        .context("Failed to fetch reviews")?;

    if ctx.output.is_json() {
        ctx.output.json(&reviews);
        return Ok(());
    }

    ctx.output
        .header(&format!("Reviews for product {}", args.product_id));
    if reviews.is_empty() {
        ctx.output.info("No reviews yet");
        return Ok(());
    }
    for review in &reviews {
        let stars = usize::from(review.rating.get());
        ctx.output.list_item(&format!(
            "{}{}  {}",
            "★".repeat(stars),
            "☆".repeat(5 - stars),
            review.created_at.format("%Y-%m-%d")
        ));
        if let Some(comment) = &review.comment {
            ctx.output.kv("  ", comment);
        }
    }
    Ok(())
}
