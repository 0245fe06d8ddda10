use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lazyimg_image::{BBox2i, Image, ImageView};
use lazyimg_imgproc::filter::{convolution_filter, gaussian_blur, kernels, Kernel};
use lazyimg_imgproc::padding::EdgeExtension;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 7, 9, 11, 17].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_size = [*width, *height].into();
            let image_f32 = Image::from_fn(image_size, 3, |x, y, p| ((x + y + p) % 255) as f32);
            let image_u8 = image_f32.cast::<u8>();

            // output image
            let output_f32 = Image::from_size_val(image_size, 3, 0.0f32).unwrap();

            group.bench_with_input(
                BenchmarkId::new("separable_f32", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let view = gaussian_blur(
                        src.as_view(),
                        (*kernel_size, *kernel_size),
                        (1.5, 1.5),
                        EdgeExtension::Reflect101,
                    )
                    .unwrap();
                    b.iter(|| black_box(view.rasterize(&mut dst.as_view_mut(), view.bbox())))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("separable_u8", &parameter_string),
                &(&image_u8, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let view = gaussian_blur(
                        src.as_view(),
                        (*kernel_size, *kernel_size),
                        (1.5, 1.5),
                        EdgeExtension::Reflect101,
                    )
                    .unwrap();
                    b.iter(|| black_box(view.rasterize(&mut dst.as_view_mut(), view.bbox())))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("general_2d_f32", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    let k = kernels::gaussian_kernel_1d(*kernel_size, 1.5).unwrap();
                    let view = convolution_filter(
                        src.as_view(),
                        Kernel::from_outer_product(&k, &k),
                        EdgeExtension::Reflect101,
                    );
                    b.iter(|| black_box(view.rasterize(&mut dst.as_view_mut(), view.bbox())))
                },
            );
        }
    }

    group.finish();
}

fn bench_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tiled Rasterization");

    let image = Image::from_fn([1024, 896].into(), 1, |x, y, _| ((x * y) % 255) as f32);
    let view =
        gaussian_blur(image.as_view(), (7, 7), (1.5, 1.5), EdgeExtension::Replicate).unwrap();

    for tile in [32usize, 64, 128, 256].iter() {
        group.bench_with_input(BenchmarkId::new("separable_tiles", tile), tile, |b, &tile| {
            let mut dst = Image::from_size_val([tile, tile].into(), 1, 0.0f32).unwrap();
            b.iter(|| {
                for y in (0..view.rows()).step_by(tile).take(4) {
                    for x in (0..view.cols()).step_by(tile).take(4) {
                        let bbox = BBox2i::new(x as isize, y as isize, tile, tile);
                        black_box(view.rasterize(&mut dst.as_view_mut(), bbox)).unwrap();
                    }
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filters, bench_tiles);
criterion_main!(benches);
