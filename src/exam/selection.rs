//! 模拟考试抽题
//!
//! 按分类均衡抽取：每个分类先分到相同配额，余数依次分给靠前的分类；
//! 某分类题目不足时，从剩余题目中随机补齐；最后整体打乱顺序

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::exam::ExamQuestion;

/// 从题库中按分类均衡抽取 `count` 道题
///
/// 返回 `min(count, bank.len())` 道不重复的题目
pub fn select_balanced<R: Rng + ?Sized>(
    bank: &[ExamQuestion],
    count: usize,
    categories: &[String],
    rng: &mut R,
) -> Vec<ExamQuestion> {
    let count = count.min(bank.len());
    if count == 0 {
        return Vec::new();
    }

    let mut picked: Vec<usize> = Vec::with_capacity(count);

    if !categories.is_empty() {
        let base = count / categories.len();
        let remainder = count % categories.len();

        for (position, category) in categories.iter().enumerate() {
            let quota = base + usize::from(position < remainder);

            let mut pool: Vec<usize> = bank
                .iter()
                .enumerate()
                .filter(|(index, item)| &item.category == category && !picked.contains(index))
                .map(|(index, _)| index)
                .collect();
            pool.shuffle(rng);
            picked.extend(pool.into_iter().take(quota));
        }
    }

    if picked.len() < count {
        let mut leftovers: Vec<usize> = (0..bank.len())
            .filter(|index| !picked.contains(index))
            .collect();
        leftovers.shuffle(rng);

        let shortfall = count - picked.len();
        tracing::debug!("分类题目不足，从剩余题目中补齐 {} 道", shortfall);
        picked.extend(leftovers.into_iter().take(shortfall));
    }

    picked.shuffle(rng);
    picked.into_iter().map(|index| bank[index].clone()).collect()
}
