use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use lazyimg_image::{view::to_image, BBox2i, Image, ImageError, ImageView, PixelMask};
use lazyimg_imgproc::filter::{ConvolutionView, Kernel, SeparableConvolutionView};
use lazyimg_imgproc::padding::EdgeExtension;

const EDGES: [EdgeExtension; 5] = [
    EdgeExtension::Zero,
    EdgeExtension::Replicate,
    EdgeExtension::Reflect,
    EdgeExtension::Reflect101,
    EdgeExtension::Wrap,
];

fn random_image(rng: &mut StdRng, width: usize, height: usize, planes: usize) -> Image<f32> {
    Image::from_fn([width, height].into(), planes, |_, _, _| rng.random::<f32>())
}

fn random_factor(rng: &mut StdRng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.random_range(-1.0f32..1.0)).collect()
}

fn constant_5x5() -> Result<Image<f32>, ImageError> {
    Image::from_size_val([5, 5].into(), 1, 1.0f32)
}

fn assert_views_eq<A, B>(a: &A, b: &B, bbox: BBox2i)
where
    A: ImageView<Pixel = f32>,
    B: ImageView<Pixel = f32>,
{
    for y in bbox.y..bbox.max().1 {
        for x in bbox.x..bbox.max().0 {
            for p in 0..a.planes() {
                assert_relative_eq!(a.get(x, y, p), b.get(x, y, p), epsilon = 1e-4);
            }
        }
    }
}

#[test]
fn identity_kernel() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(0);
    let image = random_image(&mut rng, 7, 5, 3);

    for edge in EDGES {
        let view = ConvolutionView::new(image.clone(), Kernel::new(1, 1, vec![1.0f32])?, edge);
        assert_eq!(to_image(&view)?, image);

        let view = SeparableConvolutionView::new(image.clone(), &[0.0f32, 1.0, 0.0], &[1.0], edge);
        assert_eq!(to_image(&view)?, image);
    }
    Ok(())
}

#[test]
fn separable_matches_outer_product() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(42);
    let image = random_image(&mut rng, 13, 11, 2);

    for (ni, nj) in [(3, 3), (5, 2), (1, 4), (4, 1), (6, 7)] {
        let row = random_factor(&mut rng, ni);
        let col = random_factor(&mut rng, nj);
        let (ci, cj) = (rng.random_range(0..ni), rng.random_range(0..nj));

        for edge in EDGES {
            let separable =
                SeparableConvolutionView::with_origin(image.clone(), &row, &col, ci, cj, edge);
            let general = ConvolutionView::with_origin(
                image.clone(),
                Kernel::from_outer_product(&row, &col),
                ci,
                cj,
                edge,
            );

            let tiled = to_image(&separable)?;
            assert_views_eq(&tiled, &general, general.bbox());
            assert_views_eq(&separable, &general, general.bbox());
        }
    }
    Ok(())
}

#[test]
fn tiles_match_point_access() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(7);
    let image = random_image(&mut rng, 16, 12, 1);
    let row = random_factor(&mut rng, 5);
    let col = random_factor(&mut rng, 3);

    let general = ConvolutionView::with_origin(
        image.clone(),
        Kernel::from_outer_product(&row, &col),
        1,
        2,
        EdgeExtension::Reflect101,
    );
    let separable = SeparableConvolutionView::with_origin(
        image,
        &row,
        &col,
        1,
        2,
        EdgeExtension::Reflect101,
    );

    for _ in 0..20 {
        let (width, height) = (rng.random_range(1..9), rng.random_range(1..9));
        let bbox = BBox2i::new(
            rng.random_range(-3i64..14) as isize,
            rng.random_range(-3i64..10) as isize,
            width,
            height,
        );

        let mut tile = Image::from_size_val([width, height].into(), 1, 0.0f32)?;

        general.rasterize(&mut tile.as_view_mut(), bbox)?;
        for y in 0..height {
            for x in 0..width {
                let (gx, gy) = (bbox.x + x as isize, bbox.y + y as isize);
                let expected = general.get(gx, gy, 0);
                assert_relative_eq!(*tile.get_unchecked(x, y, 0), expected, epsilon = 1e-5);
            }
        }

        separable.rasterize(&mut tile.as_view_mut(), bbox)?;
        for y in 0..height {
            for x in 0..width {
                let (gx, gy) = (bbox.x + x as isize, bbox.y + y as isize);
                let expected = separable.get(gx, gy, 0);
                assert_relative_eq!(*tile.get_unchecked(x, y, 0), expected, epsilon = 1e-4);
            }
        }
    }
    Ok(())
}

#[test]
fn normalized_kernel_preserves_constant() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(3);
    let image = Image::from_size_val([9, 8].into(), 2, 0.75f32)?;

    let mut coeffs = random_factor(&mut rng, 15).iter().map(|k| k.abs()).collect::<Vec<_>>();
    let norm = coeffs.iter().sum::<f32>();
    coeffs.iter_mut().for_each(|k| *k /= norm);

    let view = ConvolutionView::new(image, Kernel::new(5, 3, coeffs)?, EdgeExtension::Zero);
    let out = to_image(&view)?;

    // away from the border the window never samples the zero extension
    for y in 1..7 {
        for x in 2..7 {
            for p in 0..2 {
                assert_relative_eq!(*out.get_unchecked(x, y, p), 0.75, epsilon = 1e-5);
            }
        }
    }
    Ok(())
}

#[test]
fn box_kernel_with_zero_extension() -> Result<(), ImageError> {
    let general = ConvolutionView::new(
        constant_5x5()?,
        Kernel::new(3, 3, vec![1.0f32 / 9.0; 9])?,
        EdgeExtension::Zero,
    );
    let separable = SeparableConvolutionView::new(
        constant_5x5()?,
        &[1.0f32 / 3.0; 3],
        &[1.0f32 / 3.0; 3],
        EdgeExtension::Zero,
    );

    for out in [to_image(&general)?, to_image(&separable)?] {
        for y in 1..4 {
            for x in 1..4 {
                assert_relative_eq!(*out.get_unchecked(x, y, 0), 1.0, epsilon = 1e-5);
            }
        }
        assert_relative_eq!(*out.get_unchecked(0, 0, 0), 4.0 / 9.0, epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn separable_121_with_zero_extension() -> Result<(), ImageError> {
    let kernel = [1.0f32, 2.0, 1.0];
    let separable =
        SeparableConvolutionView::new(constant_5x5()?, &kernel, &kernel, EdgeExtension::Zero);
    let general = ConvolutionView::new(
        constant_5x5()?,
        Kernel::from_outer_product(&kernel, &kernel),
        EdgeExtension::Zero,
    );

    let out = to_image(&separable)?;
    for y in 1..4 {
        for x in 1..4 {
            assert_eq!(*out.get_unchecked(x, y, 0), 16.0);
        }
    }

    assert_eq!(*out.get_unchecked(0, 0, 0), general.get(0, 0, 0));
    assert_eq!(*out.get_unchecked(0, 0, 0), 9.0);
    assert_eq!(*out.get_unchecked(2, 0, 0), general.get(2, 0, 0));
    assert_eq!(*out.get_unchecked(2, 0, 0), 12.0);
    Ok(())
}

#[test]
fn empty_row_factor() -> Result<(), ImageError> {
    let mut rng = StdRng::seed_from_u64(11);
    let image = random_image(&mut rng, 8, 9, 2);
    let col = random_factor(&mut rng, 4);

    for edge in EDGES {
        let separable = SeparableConvolutionView::with_origin(image.clone(), &[], &col, 0, 1, edge);
        let column = ConvolutionView::with_origin(
            image.clone(),
            Kernel::new(1, col.len(), col.clone())?,
            0,
            1,
            edge,
        );
        let both = SeparableConvolutionView::with_origin(image.clone(), &[1.0], &col, 0, 1, edge);

        let out = to_image(&separable)?;
        assert_views_eq(&out, &column, column.bbox());
        assert_eq!(out, to_image(&both)?);
    }
    Ok(())
}

#[test]
fn masked_pixels_poison_their_neighborhood() -> Result<(), ImageError> {
    let mut image = Image::from_size_val([6, 6].into(), 1, PixelMask::new(1.0f32))?;
    if let Some(px) = image.get_mut(3, 2, 0) {
        px.invalidate();
    }

    let kernel = [1.0f32, 1.0, 1.0];
    let separable =
        SeparableConvolutionView::new(image.clone(), &kernel, &kernel, EdgeExtension::Replicate);
    let general = ConvolutionView::new(
        image,
        Kernel::from_outer_product(&kernel, &kernel),
        EdgeExtension::Replicate,
    );

    let out = to_image(&separable)?;
    for y in 0..6 {
        for x in 0..6 {
            let poisoned = (2..=4).contains(&x) && (1..=3).contains(&y);
            let pixel = out.get_unchecked(x, y, 0);
            assert_eq!(pixel.is_valid(), !poisoned, "pixel ({x}, {y})");
            assert_eq!(general.get(x as isize, y as isize, 0).is_valid(), !poisoned);
            if !poisoned {
                assert_eq!(*pixel.value(), 9.0);
            }
        }
    }
    Ok(())
}

#[test]
fn u8_image_saturates_on_cast() -> Result<(), ImageError> {
    let image = Image::new([3, 1].into(), 1, vec![100u8, 200, 250])?;
    let view = SeparableConvolutionView::new(image, &[1.0f32, 1.0], &[], EdgeExtension::Zero);

    // origin at the first tap: out(x) = in(x) + in(x - 1)
    let out = to_image(&view)?;
    assert_eq!(out.as_slice(), &[100.0, 300.0, 450.0]);
    assert_eq!(out.cast::<u8>().as_slice(), &[100, 255, 255]);
    Ok(())
}
