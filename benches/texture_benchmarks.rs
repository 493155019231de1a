use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gl_texture::{
    Color, ColorFormat, Dimension2d, Driver, DriverConfig, DriverFeatures, Image,
    SoftwareContext, Texture,
};

fn gradient(size: Dimension2d) -> Image {
    let mut image = Image::new(ColorFormat::A8R8G8B8, size);
    for y in 0..size.height {
        for x in 0..size.width {
            image.set_pixel(x, y, Color::new(0xff, x as u8, y as u8, (x ^ y) as u8));
        }
    }
    image
}

// ---------------------------------------------------------------------------
// CPU image conversion
// ---------------------------------------------------------------------------

fn bench_convert_copy(c: &mut Criterion) {
    let source = gradient(Dimension2d::new(256, 256));
    c.bench_function("image_copy_argb8_to_a1r5g5b5_256", |b| {
        let mut target = Image::new(ColorFormat::A1R5G5B5, Dimension2d::new(256, 256));
        b.iter(|| {
            source.copy_to(&mut target);
            black_box(&target);
        });
    });
}

fn bench_scaling_copy(c: &mut Criterion) {
    let source = gradient(Dimension2d::new(300, 200));
    c.bench_function("image_scale_300x200_to_512x256", |b| {
        let mut target = Image::new(ColorFormat::A8R8G8B8, Dimension2d::new(512, 256));
        b.iter(|| {
            source.copy_to_scaling(&mut target);
            black_box(&target);
        });
    });
}

// ---------------------------------------------------------------------------
// Texture creation
// ---------------------------------------------------------------------------

fn bench_manual_mip_chain(c: &mut Criterion) {
    let source = Arc::new(gradient(Dimension2d::new(256, 256)));
    let config = DriverConfig::default().with_features(DriverFeatures::TEXTURE_NPOT);
    c.bench_function("texture_create_manual_mips_256", |b| {
        let mut driver = Driver::new(SoftwareContext::new(), config.clone());
        b.iter(|| {
            let texture = Texture::from_image(&mut driver, "bench", &source, None)
                .expect("texture creation");
            texture.destroy(&mut driver);
            driver.gl_mut().take_calls();
        });
    });
}

criterion_group!(
    benches,
    bench_convert_copy,
    bench_scaling_copy,
    bench_manual_mip_chain,
);
criterion_main!(benches);
